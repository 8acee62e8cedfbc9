//! Email classifier service binary.
//! Loads configuration, builds the classifier once, and serves the HTTP router.

use anyhow::Context;
use email_classifier::ai_bootstrap::ClassifierRuntime;
use email_classifier::api::{self, AppState};
use email_classifier::config::AppConfig;
use email_classifier::metrics::Metrics;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `LOG_FORMAT=json` for structured output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("email_classifier=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load_default()?;
    let bind = cfg.server.bind.clone();
    let runtime = ClassifierRuntime::from_config(cfg)?;
    runtime.quick_probe().await;

    let metrics = Metrics::init(runtime.classifier.adapter().is_enabled())?;
    let app = api::router(AppState::new(runtime.classifier.clone())).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("email classifier listening on {bind}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
