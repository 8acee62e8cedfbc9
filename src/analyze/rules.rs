//! Keyword scorer.
//!
//! Per category: `hits / keywords`, where a hit is a keyword entry occurring
//! anywhere in the lower-cased text. Repeated occurrences in the text count once;
//! a keyword listed twice in the lexicon counts twice. The densities are then
//! normalized to sum to 1. With no hit at all the result is the `corporate`
//! fallback vector.

use crate::lexicon::CategoryLexicon;
use crate::scores::ScoreVector;

/// Raw per-category keyword densities in [0, 1].
pub fn keyword_densities(normalized_text: &str, lexicon: &CategoryLexicon) -> ScoreVector {
    let text = normalized_text.to_lowercase();
    ScoreVector::from_fn(|c| {
        let kws = lexicon.keywords(c);
        if kws.is_empty() {
            return 0.0;
        }
        let hits = kws.iter().filter(|k| text.contains(k.as_str())).count();
        hits as f64 / kws.len() as f64
    })
}

/// Normalized rule-based vector. Always sums to 1.
pub fn score_rule_based(normalized_text: &str, lexicon: &CategoryLexicon) -> ScoreVector {
    keyword_densities(normalized_text, lexicon)
        .normalized()
        .unwrap_or_else(ScoreVector::corporate_fallback)
}
