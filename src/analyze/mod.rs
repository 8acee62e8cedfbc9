// src/analyze/mod.rs
//! Classification pipeline entry: normalize → keyword scores + sentiment signal → fusion.

pub mod ai_adapter;
pub mod normalize;
pub mod rules;
pub mod scoring;

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::ClassifyError;
use crate::lexicon::CategoryLexicon;
use crate::scores::{round_to, Category, Method, ScoreVector};

// Re-export convenient types.
pub use crate::analyze::ai_adapter::{
    DisabledModel, FixedSentimentModel, HttpSentimentModel, LabelScore, SentimentAdapter,
    SentimentModel,
};
pub use crate::analyze::normalize::normalize;
pub use crate::analyze::rules::score_rule_based;
pub use crate::analyze::scoring::{fuse, is_spam, SPAM_THRESHOLD};

/// Decimal places of every number in the result.
pub const ROUND_DECIMALS: i32 = 3;
/// Preview length of `processed_text`, in characters.
pub const PREVIEW_CHARS: usize = 200;

/// Predicted category block of the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPrediction {
    pub predicted: Category,
    pub confidence: f64,
    pub all_scores: ScoreVector,
}

/// Output of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub category: CategoryPrediction,
    pub is_spam: bool,
    pub spam_score: f64,
    /// Normalized text length in characters.
    pub text_length: usize,
    pub processed_text: String,
    pub method: Method,
    /// Unrounded fused vector the decision was made on.
    #[serde(skip)]
    pub scores: ScoreVector,
}

/// Classification facade. Cheap to clone; lexicon and model are shared.
#[derive(Clone)]
pub struct EmailClassifier {
    lexicon: Arc<CategoryLexicon>,
    adapter: SentimentAdapter,
}

impl EmailClassifier {
    pub fn new(lexicon: Arc<CategoryLexicon>, adapter: SentimentAdapter) -> Self {
        Self { lexicon, adapter }
    }

    /// Built-in lexicon, no sentiment backend.
    pub fn rule_based() -> Self {
        Self::new(Arc::new(CategoryLexicon::builtin()), SentimentAdapter::disabled())
    }

    pub fn lexicon(&self) -> &CategoryLexicon {
        &self.lexicon
    }

    pub fn adapter(&self) -> &SentimentAdapter {
        &self.adapter
    }

    /// Classify raw email text.
    ///
    /// Fails only with `ClassifyError::EmptyInput` when nothing is left after
    /// normalization. Sentiment backend problems degrade to `rule-based`.
    pub async fn classify(&self, raw_text: &str) -> Result<ClassificationResult, ClassifyError> {
        let started = Instant::now();
        let cleaned = normalize(raw_text);
        if cleaned.is_empty() {
            info!(raw_len = raw_text.len(), "rejecting email: empty after preprocessing");
            counter!("email_classify_empty_total").increment(1);
            return Err(ClassifyError::EmptyInput);
        }

        let rule = score_rule_based(&cleaned, &self.lexicon);
        let signal = self.adapter.score(&cleaned).await;
        let (fused, method) = fuse(&rule, &signal);

        let result = build_result(cleaned, fused, method);

        debug!(
            id = %anon_hash(raw_text),
            predicted = %result.category.predicted,
            confidence = result.category.confidence,
            spam_score = result.spam_score,
            is_spam = result.is_spam,
            %method,
            "email classified"
        );
        counter!(
            "email_classifications_total",
            "category" => result.category.predicted.as_str(),
            "method" => method.as_str()
        )
        .increment(1);
        histogram!("email_classify_ms").record(started.elapsed().as_secs_f64() * 1000.0);

        Ok(result)
    }
}

/// Assemble the result record from a fused vector.
pub fn build_result(cleaned: String, fused: ScoreVector, method: Method) -> ClassificationResult {
    let (predicted, confidence) = fused.argmax();
    let spam = fused.get(Category::Spam);
    let text_length = cleaned.chars().count();
    let processed_text = preview(cleaned, PREVIEW_CHARS);

    ClassificationResult {
        category: CategoryPrediction {
            predicted,
            confidence: round_to(confidence, ROUND_DECIMALS),
            all_scores: fused.rounded(ROUND_DECIMALS),
        },
        is_spam: is_spam(&fused),
        spam_score: round_to(spam, ROUND_DECIMALS),
        text_length,
        processed_text,
        method,
        scores: fused,
    }
}

/// First `max` characters, with `...` appended when something was cut.
fn preview(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

/// Short anonymous id for log lines; raw email text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
