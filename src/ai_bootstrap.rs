// src/ai_bootstrap.rs
use crate::analyze::ai_adapter::{
    DisabledModel, DynSentimentModel, FixedSentimentModel, HttpSentimentModel, SentimentAdapter,
};
use crate::analyze::EmailClassifier;
use crate::config::{AppConfig, Provider, SentimentConfig};
use crate::lexicon::CategoryLexicon;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

/// Process-lifetime classifier state, built once at startup.
pub struct ClassifierRuntime {
    pub cfg: AppConfig,
    pub classifier: Arc<EmailClassifier>,
}

impl ClassifierRuntime {
    /// Lexicon errors are fatal; a sentiment backend that cannot be built is not.
    pub fn from_config(cfg: AppConfig) -> anyhow::Result<Self> {
        let lexicon = match &cfg.lexicon.path {
            Some(p) => CategoryLexicon::load_from_file(p)
                .with_context(|| format!("loading lexicon {}", p.display()))?,
            None => CategoryLexicon::builtin(),
        };

        let model = build_model(&cfg.sentiment);
        // Safe diagnostics: provider + key presence only
        info!(
            "classifier ready: provider={}, enabled={}, has_key={}, timeout_ms={}",
            model.name(),
            model.is_enabled(),
            cfg.sentiment.api_key.is_some(),
            cfg.sentiment.timeout_ms
        );
        let adapter = SentimentAdapter::new(model).with_timeout(cfg.sentiment.timeout());
        let classifier = Arc::new(EmailClassifier::new(Arc::new(lexicon), adapter));
        Ok(Self { cfg, classifier })
    }

    /// Classify a fixed sample and log which method answered. Never fails.
    pub async fn quick_probe(&self) {
        let sample = "Subject: Login\n\nHi, I cannot access my account since the password reset. Please help.";
        match self.classifier.classify(sample).await {
            Ok(r) => info!(
                predicted = %r.category.predicted,
                method = %r.method,
                "classifier quick_probe ok"
            ),
            Err(e) => warn!(error = %e, "classifier quick_probe failed"),
        }
    }
}

/// Pick the sentiment model for `cfg`, falling back to `DisabledModel`.
pub fn build_model(cfg: &SentimentConfig) -> DynSentimentModel {
    match cfg.effective_provider() {
        Provider::Disabled => Arc::new(DisabledModel),
        Provider::Mock => Arc::new(FixedSentimentModel::neutral()),
        Provider::Http => {
            let Some(endpoint) = cfg.endpoint.as_deref() else {
                warn!("sentiment provider 'http' has no endpoint; using rule-based fallback");
                return Arc::new(DisabledModel);
            };
            match HttpSentimentModel::new(endpoint, cfg.api_key.clone(), cfg.timeout()) {
                Ok(m) => Arc::new(m),
                Err(e) => {
                    warn!(error = %e, "could not build sentiment model; using rule-based fallback");
                    Arc::new(DisabledModel)
                }
            }
        }
    }
}
