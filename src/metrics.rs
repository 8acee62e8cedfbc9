use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and describe the series.
    pub fn init(adapter_enabled: bool) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_counter!(
            "email_classifications_total",
            "Classified emails by predicted category and method."
        );
        describe_counter!(
            "email_classify_empty_total",
            "Requests rejected because the text was empty after preprocessing."
        );
        describe_counter!(
            "sentiment_adapter_failures_total",
            "Sentiment backend calls that failed or timed out."
        );
        describe_histogram!("email_classify_ms", "Classification latency in milliseconds.");
        describe_gauge!(
            "sentiment_adapter_enabled",
            "1 when a sentiment backend is configured, else 0."
        );

        gauge!("sentiment_adapter_enabled").set(if adapter_enabled { 1.0 } else { 0.0 });

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
