// src/config/sentiment.rs
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use tracing::warn;

pub const ENV_SENTIMENT_API_KEY: &str = "SENTIMENT_API_KEY";

fn default_timeout_ms() -> u64 {
    10_000
}

/// Which sentiment backend to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Http,
    Mock,
    #[default]
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub enabled: bool,
    pub provider: Provider,
    /// Inference URL for the `http` provider.
    pub endpoint: Option<String>,
    /// Literal token, or "ENV" to read `SENTIMENT_API_KEY`.
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: Provider::Disabled,
            endpoint: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SentimentConfig {
    /// Resolve "ENV" key placeholders and clamp nonsense values.
    /// A missing key env var only drops the key; the backend may still accept anonymous calls.
    pub fn sanitize(&mut self) {
        if let Some(key) = &self.api_key {
            if key.trim().eq_ignore_ascii_case("env") {
                self.api_key = env::var(ENV_SENTIMENT_API_KEY)
                    .ok()
                    .filter(|k| !k.trim().is_empty());
                if self.api_key.is_none() && self.effective_provider() == Provider::Http {
                    warn!("{ENV_SENTIMENT_API_KEY} is not set; calling sentiment endpoint without a token");
                }
            }
        }
        if self.timeout_ms == 0 {
            self.timeout_ms = default_timeout_ms();
        }
        if let Some(ep) = &self.endpoint {
            if ep.trim().is_empty() {
                self.endpoint = None;
            }
        }
    }

    /// Provider that will actually be used (`enabled = false` wins).
    pub fn effective_provider(&self) -> Provider {
        if self.enabled {
            self.provider
        } else {
            Provider::Disabled
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_flag_overrides_provider() {
        let cfg = SentimentConfig {
            enabled: false,
            provider: Provider::Http,
            ..Default::default()
        };
        assert_eq!(cfg.effective_provider(), Provider::Disabled);
    }

    #[test]
    fn sanitize_fixes_zero_timeout_and_blank_endpoint() {
        let mut cfg = SentimentConfig {
            timeout_ms: 0,
            endpoint: Some("  ".into()),
            ..Default::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.timeout_ms, 10_000);
        assert!(cfg.endpoint.is_none());
    }

    #[serial_test::serial]
    #[test]
    fn env_placeholder_resolves_api_key() {
        env::set_var(ENV_SENTIMENT_API_KEY, "tok-123");
        let mut cfg = SentimentConfig {
            api_key: Some("ENV".into()),
            ..Default::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.api_key.as_deref(), Some("tok-123"));

        env::remove_var(ENV_SENTIMENT_API_KEY);
        let mut missing = SentimentConfig {
            api_key: Some("env".into()),
            ..Default::default()
        };
        missing.sanitize();
        assert!(missing.api_key.is_none());
    }
}
