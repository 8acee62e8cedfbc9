//! Score fusion.
//!
//! combined[c] = W_RULE * rule[c] + W_SIGNAL * signal[c]   (missing signal entries are 0)
//!
//! The combined vector is renormalized; a non-positive total falls back to the rule
//! vector. An empty signal leaves the rule vector untouched.

use crate::scores::{Category, Method, ScoreVector, SignalScores};

pub const W_RULE: f64 = 0.7;
pub const W_SIGNAL: f64 = 0.3;

/// Fused spam score above this marks the email as spam.
pub const SPAM_THRESHOLD: f64 = 0.3;

/// Combine the rule-based vector with the (possibly empty) statistical contributions.
pub fn fuse(rule: &ScoreVector, signal: &SignalScores) -> (ScoreVector, Method) {
    if signal.is_empty() {
        return (*rule, Method::RuleBased);
    }

    let combined = ScoreVector::from_fn(|c| W_RULE * rule.get(c) + W_SIGNAL * signal.get(c));
    let fused = combined.normalized().unwrap_or(*rule);
    (fused, Method::Hybrid)
}

/// Spam decision on a fused vector.
#[inline]
pub fn is_spam(fused: &ScoreVector) -> bool {
    fused.get(Category::Spam) > SPAM_THRESHOLD
}
