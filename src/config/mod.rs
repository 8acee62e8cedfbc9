// src/config/mod.rs
//! Service configuration.
//!
//! Lookup order:
//! 1) `$EMAIL_CLASSIFIER_CONFIG` (must exist if set)
//! 2) `config/classifier.toml`
//! 3) built-in defaults
//!
//! Env overrides applied afterwards: `SENTIMENT_ENABLED`, `SENTIMENT_ENDPOINT`,
//! `CLASSIFIER_BIND`.

pub mod sentiment;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use sentiment::{Provider, SentimentConfig};

pub const ENV_CONFIG_PATH: &str = "EMAIL_CLASSIFIER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/classifier.toml";

const ENV_SENTIMENT_ENABLED: &str = "SENTIMENT_ENABLED";
const ENV_SENTIMENT_ENDPOINT: &str = "SENTIMENT_ENDPOINT";
const ENV_BIND: &str = "CLASSIFIER_BIND";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub lexicon: LexiconConfig,
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// TOML lexicon file; the built-in lexicon is used when absent.
    pub path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s).context("parsing classifier config")?;
        cfg.sentiment.sanitize();
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading classifier config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Load using env var + fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from_file(&default)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var(ENV_SENTIMENT_ENABLED) {
            self.sentiment.enabled = parse_bool(&v)
                .ok_or_else(|| anyhow!("{ENV_SENTIMENT_ENABLED} must be 1/0/true/false, got {v:?}"))?;
        }
        if let Ok(v) = std::env::var(ENV_SENTIMENT_ENDPOINT) {
            self.sentiment.endpoint = Some(v);
        }
        if let Ok(v) = std::env::var(ENV_BIND) {
            if !v.trim().is_empty() {
                self.server.bind = v.trim().to_string();
            }
        }
        self.sentiment.sanitize();
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn parses_full_file() {
        let s = r#"
            [server]
            bind = "127.0.0.1:9000"

            [lexicon]
            path = "config/lexicon.toml"

            [sentiment]
            enabled = true
            provider = "http"
            endpoint = "http://localhost:8080/predict"
            timeout_ms = 2500
        "#;
        let cfg = AppConfig::from_toml_str(s).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:9000");
        assert_eq!(cfg.lexicon.path.as_deref(), Some(Path::new("config/lexicon.toml")));
        assert_eq!(cfg.sentiment.effective_provider(), Provider::Http);
        assert_eq!(cfg.sentiment.timeout_ms, 2500);
    }

    #[test]
    fn empty_file_means_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8000");
        assert!(cfg.lexicon.path.is_none());
        assert_eq!(cfg.sentiment.effective_provider(), Provider::Disabled);
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let s = "[sentiment]\nprovider = \"onnx\"\n";
        assert!(AppConfig::from_toml_str(s).is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_SENTIMENT_ENABLED);
        env::remove_var(ENV_SENTIMENT_ENDPOINT);
        env::remove_var(ENV_BIND);

        // No file in the temp CWD -> defaults
        let cfg = AppConfig::load_default().unwrap();
        assert_eq!(cfg.sentiment.effective_provider(), Provider::Disabled);

        // Env path wins
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[sentiment]\nenabled = true\nprovider = \"mock\"\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let cfg = AppConfig::load_default().unwrap();
        assert_eq!(cfg.sentiment.effective_provider(), Provider::Mock);

        // Override switches it off again
        env::set_var(ENV_SENTIMENT_ENABLED, "0");
        let cfg = AppConfig::load_default().unwrap();
        assert_eq!(cfg.sentiment.effective_provider(), Provider::Disabled);
        env::remove_var(ENV_SENTIMENT_ENABLED);

        // Missing env path is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        assert!(AppConfig::load_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
