//! Error taxonomy.
//!
//! `ClassifyError` is the only error `EmailClassifier::classify` returns.
//! `ClassifierError` describes statistical backend failures; the adapter absorbs
//! them, so they are only visible through `SentimentAdapter::try_score`.

use std::time::Duration;
use thiserror::Error;

use crate::scores::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("email content is empty after preprocessing")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("sentiment backend could not be built: {0}")]
    Init(String),

    #[error("sentiment request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sentiment backend returned HTTP {0}")]
    Status(u16),

    #[error("sentiment response could not be decoded: {0}")]
    Decode(String),

    #[error("sentiment label {label:?} has out-of-range score {score}")]
    InvalidScore { label: String, score: f64 },

    #[error("sentiment call timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("reading lexicon {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing lexicon: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("lexicon category '{0}' has no keywords")]
    EmptyCategory(Category),
}
