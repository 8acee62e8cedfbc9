//! Statistical signal adapter: sentiment model abstraction + label-to-category mapping.
//!
//! The model is selected once at startup:
//! - `HttpSentimentModel` calls a text-classification inference endpoint,
//! - `FixedSentimentModel` returns a canned answer (local runs, tests),
//! - `DisabledModel` always answers with nothing.
//!
//! `SentimentAdapter::score` never fails. Backend errors and timeouts are logged
//! and turn into an empty `SignalScores`, which downstream means "rule-based".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ClassifierError;
use crate::scores::{Category, SignalScores};

/// Context limit of the backing model, in characters.
pub const MAX_INPUT_CHARS: usize = 512;

/// One `(label, probability)` pair returned by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Capability consumed by the adapter. Implementations must be safe for concurrent use.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn predict(
        &self,
        text: &str,
        max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError>;

    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;

    /// `false` only for the null model.
    fn is_enabled(&self) -> bool {
        true
    }
}

pub type DynSentimentModel = Arc<dyn SentimentModel>;

// ------------------------------------------------------------
// Models
// ------------------------------------------------------------

/// Null model: no backend available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledModel;

#[async_trait]
impl SentimentModel for DisabledModel {
    async fn predict(&self, _text: &str, _max_length: usize) -> Result<Vec<LabelScore>, ClassifierError> {
        Ok(Vec::new())
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
    fn is_enabled(&self) -> bool {
        false
    }
}

/// Deterministic model returning the same pairs for every input.
#[derive(Debug, Clone)]
pub struct FixedSentimentModel {
    pub fixed: Vec<LabelScore>,
}

impl FixedSentimentModel {
    pub fn new(fixed: Vec<LabelScore>) -> Self {
        Self { fixed }
    }

    /// Balanced SST-2 style answer.
    pub fn neutral() -> Self {
        Self::new(vec![
            LabelScore::new("POSITIVE", 0.5),
            LabelScore::new("NEGATIVE", 0.5),
        ])
    }
}

#[async_trait]
impl SentimentModel for FixedSentimentModel {
    async fn predict(&self, _text: &str, _max_length: usize) -> Result<Vec<LabelScore>, ClassifierError> {
        Ok(self.fixed.clone())
    }
    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Text-classification endpoint speaking the Hugging Face inference format.
pub struct HttpSentimentModel {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSentimentModel {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ClassifierError::Init(format!(
                "endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("email-classifier/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Init(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[derive(Serialize)]
struct InferenceReq<'a> {
    inputs: &'a str,
    parameters: InferenceParams,
}

#[derive(Serialize)]
struct InferenceParams {
    truncation: bool,
    max_length: usize,
}

/// Single-input responses come back either flat or wrapped in one more array.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResp {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResp {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            InferenceResp::Flat(v) => v,
            InferenceResp::Nested(v) => v.into_iter().next().unwrap_or_default(),
        }
    }
}

/// Decode a backend response body into label scores.
pub fn parse_inference_response(body: &[u8]) -> Result<Vec<LabelScore>, ClassifierError> {
    serde_json::from_slice::<InferenceResp>(body)
        .map(InferenceResp::into_scores)
        .map_err(|e| ClassifierError::Decode(e.to_string()))
}

#[async_trait]
impl SentimentModel for HttpSentimentModel {
    async fn predict(&self, text: &str, max_length: usize) -> Result<Vec<LabelScore>, ClassifierError> {
        let req = InferenceReq {
            inputs: text,
            parameters: InferenceParams {
                truncation: true,
                max_length,
            },
        };
        let mut builder = self.http.post(&self.endpoint).json(&req);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            return Err(ClassifierError::Status(resp.status().as_u16()));
        }
        let body = resp.bytes().await?;
        parse_inference_response(&body)
    }
    fn name(&self) -> &'static str {
        "http"
    }
}

// ------------------------------------------------------------
// Adapter
// ------------------------------------------------------------

/// Wraps a model and maps its labels into partial category scores.
#[derive(Clone)]
pub struct SentimentAdapter {
    model: DynSentimentModel,
    timeout: Option<Duration>,
}

impl SentimentAdapter {
    pub fn new(model: DynSentimentModel) -> Self {
        Self {
            model,
            timeout: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledModel))
    }

    /// Caller-side deadline for one model call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_enabled()
    }

    pub fn provider_name(&self) -> &'static str {
        self.model.name()
    }

    /// Contributions for `normalized_text`; empty on any failure.
    pub async fn score(&self, normalized_text: &str) -> SignalScores {
        match self.try_score(normalized_text).await {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, provider = self.provider_name(), "sentiment signal failed; using rule-based scores");
                counter!("sentiment_adapter_failures_total", "provider" => self.provider_name())
                    .increment(1);
                SignalScores::new()
            }
        }
    }

    /// Same as `score`, but surfaces the backend error.
    pub async fn try_score(&self, normalized_text: &str) -> Result<SignalScores, ClassifierError> {
        if !self.model.is_enabled() {
            return Ok(SignalScores::new());
        }
        let input = truncate_chars(normalized_text, MAX_INPUT_CHARS);
        let call = self.model.predict(input, MAX_INPUT_CHARS);
        let labels = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ClassifierError::Timeout(limit))??,
            None => call.await?,
        };
        map_labels(&labels)
    }
}

/// Fixed label mapping:
/// - "positive": marketing += 0.3 p, corporate += 0.2 p
/// - "negative": support += 0.4 p, spam += 0.1 p
///
/// Labels are matched case-insensitively as substrings; others are ignored.
/// When several labels match the same rule, the last one wins.
pub fn map_labels(labels: &[LabelScore]) -> Result<SignalScores, ClassifierError> {
    let mut out = SignalScores::new();
    for ls in labels {
        if !ls.score.is_finite() || !(0.0..=1.0).contains(&ls.score) {
            return Err(ClassifierError::InvalidScore {
                label: ls.label.clone(),
                score: ls.score,
            });
        }
        let label = ls.label.to_lowercase();
        let p = ls.score;
        if label.contains("positive") {
            out.set(Category::Marketing, 0.3 * p);
            out.set(Category::Corporate, 0.2 * p);
        } else if label.contains("negative") {
            out.set(Category::Support, 0.4 * p);
            out.set(Category::Spam, 0.1 * p);
        }
    }
    Ok(out)
}

/// First `max` characters of `s` (char boundary safe).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
