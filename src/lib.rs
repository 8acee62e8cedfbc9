// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod ai_bootstrap;
pub mod analyze;
pub mod api;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod scores;

// ---- Re-exports for stable public API ----
pub use analyze::ai_adapter;
pub use analyze::{ClassificationResult, EmailClassifier};
pub use crate::api::router;
pub use error::{ClassifierError, ClassifyError, LexiconError};
pub use lexicon::CategoryLexicon;
pub use scores::{Category, Method, ScoreVector, SignalScores};
