//! Email text normalization: drop header lines, URLs and addresses, fold whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

// Case-sensitive, whole line.
static RE_HEADERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:From|To|Subject|Date):.*$").unwrap());

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://(?:[a-zA-Z0-9$-_@.&+!*\\(),]|%[0-9a-fA-F]{2})+").unwrap());

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw email text. Never fails; blank input yields `""`.
pub fn normalize(raw: &str) -> String {
    let out = RE_HEADERS.replace_all(raw, "");
    let out = RE_URL.replace_all(&out, "");
    let out = RE_EMAIL.replace_all(&out, "");
    let out = RE_WS.replace_all(&out, " ");
    out.trim().to_string()
}
