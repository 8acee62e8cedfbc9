//! Category keyword lexicon.
//!
//! TOML shape (all four keys required, no others allowed):
//! ```toml
//! support   = ["help", "issue", ...]
//! marketing = ["discount", ...]
//! corporate = ["meeting", ...]
//! spam      = ["lottery", ...]
//! ```
//!
//! Keywords are trimmed and lower-cased on load and empty entries are dropped.
//! Repeated entries are kept: each one counts as a separate keyword when scoring,
//! and in the density denominator. The built-in lexicon is embedded from
//! `config/lexicon.toml` and covers English and Persian.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::LexiconError;
use crate::scores::Category;

static BUILTIN: Lazy<CategoryLexicon> = Lazy::new(|| {
    let raw = include_str!("../config/lexicon.toml");
    CategoryLexicon::from_toml_str(raw).expect("valid built-in lexicon")
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLexicon {
    support: Vec<String>,
    marketing: Vec<String>,
    corporate: Vec<String>,
    spam: Vec<String>,
}

/// Immutable category → ordered keyword list. Build once, share read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLexicon {
    keywords: [Vec<String>; 4],
}

impl CategoryLexicon {
    /// The embedded default lexicon.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Build from explicit per-category lists (in `Category::ALL` order semantics).
    pub fn new<S: AsRef<str>>(
        support: &[S],
        marketing: &[S],
        corporate: &[S],
        spam: &[S],
    ) -> Result<Self, LexiconError> {
        let lists = [
            clean_list(support),
            clean_list(marketing),
            clean_list(corporate),
            clean_list(spam),
        ];
        for (c, list) in Category::ALL.iter().zip(lists.iter()) {
            if list.is_empty() {
                return Err(LexiconError::EmptyCategory(*c));
            }
        }
        Ok(Self { keywords: lists })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LexiconError> {
        let raw: RawLexicon = toml::from_str(s)?;
        Self::new(
            &raw.support[..],
            &raw.marketing[..],
            &raw.corporate[..],
            &raw.spam[..],
        )
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Lower-cased keywords of `category`, in load order.
    pub fn keywords(&self, category: Category) -> &[String] {
        &self.keywords[category as usize]
    }

    /// `(category, keywords)` in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.keywords(c)))
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn clean_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|it| it.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
