//! Category set and score vectors.
//!
//! The category set is closed: every dense `ScoreVector` carries exactly the four
//! categories, iterated in the fixed order `support, marketing, corporate, spam`.
//! That order is also the argmax tie-break order.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Support,
    Marketing,
    Corporate,
    Spam,
}

impl Category {
    /// All categories in definition order.
    pub const ALL: [Category; 4] = [
        Category::Support,
        Category::Marketing,
        Category::Corporate,
        Category::Spam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Support => "support",
            Category::Marketing => "marketing",
            Category::Corporate => "corporate",
            Category::Spam => "spam",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signals contributed to the final vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    RuleBased,
    Hybrid,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::RuleBased => "rule-based",
            Method::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense per-category scores. Raw or normalized depending on where it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreVector([f64; 4]);

impl ScoreVector {
    pub const fn zero() -> Self {
        Self([0.0; 4])
    }

    /// Full weight on `corporate`; used when no keyword matched at all.
    pub const fn corporate_fallback() -> Self {
        Self([0.0, 0.0, 1.0, 0.0])
    }

    pub fn from_fn(mut f: impl FnMut(Category) -> f64) -> Self {
        let mut out = Self::zero();
        for c in Category::ALL {
            out.0[c.index()] = f(c);
        }
        out
    }

    #[inline]
    pub fn get(&self, c: Category) -> f64 {
        self.0[c.index()]
    }

    #[inline]
    pub fn set(&mut self, c: Category, v: f64) {
        self.0[c.index()] = v;
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(category, score)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Divide by the total. Returns `None` when the total is not positive.
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total();
        if total > 0.0 && total.is_finite() {
            Some(Self::from_fn(|c| self.get(c) / total))
        } else {
            None
        }
    }

    /// Highest score; the earliest category in definition order wins ties.
    pub fn argmax(&self) -> (Category, f64) {
        let mut best = (Category::ALL[0], self.get(Category::ALL[0]));
        for (c, v) in self.iter().skip(1) {
            if v > best.1 {
                best = (c, v);
            }
        }
        best
    }

    /// Copy with every entry rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self::from_fn(|c| round_to(self.get(c), decimals))
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (c, v) in self.iter() {
            map.serialize_entry(c.as_str(), &v)?;
        }
        map.end()
    }
}

/// Sparse, unnormalized contributions from the statistical signal.
/// A missing category means 0. An empty value means "no contribution".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalScores(BTreeMap<Category, f64>);

impl SignalScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Score for `c`, 0.0 if absent.
    pub fn get(&self, c: Category) -> f64 {
        self.0.get(&c).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, c: Category) -> bool {
        self.0.contains_key(&c)
    }

    /// Set the contribution for `c`, replacing any earlier value.
    pub fn set(&mut self, c: Category, v: f64) {
        self.0.insert(c, v);
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_definition_order_on_ties() {
        let v = ScoreVector::from_fn(|c| match c {
            Category::Marketing | Category::Spam => 0.5,
            _ => 0.0,
        });
        assert_eq!(v.argmax(), (Category::Marketing, 0.5));

        let flat = ScoreVector::from_fn(|_| 0.25);
        assert_eq!(flat.argmax().0, Category::Support);
    }

    #[test]
    fn normalized_refuses_zero_total() {
        assert!(ScoreVector::zero().normalized().is_none());
        let v = ScoreVector::from_fn(|c| if c == Category::Spam { 2.0 } else { 0.0 });
        let n = v.normalized().unwrap();
        assert_eq!(n.get(Category::Spam), 1.0);
    }

    #[test]
    fn serializes_all_four_keys_in_order() {
        let json = serde_json::to_string(&ScoreVector::corporate_fallback()).unwrap();
        assert_eq!(
            json,
            r#"{"support":0.0,"marketing":0.0,"corporate":1.0,"spam":0.0}"#
        );
    }

    #[test]
    fn signal_scores_overwrite_and_default_to_zero() {
        let mut s = SignalScores::new();
        assert!(s.is_empty());
        s.set(Category::Support, 0.2);
        s.set(Category::Support, 0.1);
        assert_eq!(s.get(Category::Support), 0.1);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(Category::Spam), 0.0);
        assert!(!s.contains(Category::Spam));
    }

    #[test]
    fn round_to_three_places() {
        assert_eq!(round_to(0.33333, 3), 0.333);
        assert_eq!(round_to(0.6666, 3), 0.667);
        assert_eq!(round_to(1.0, 3), 1.0);
    }
}
