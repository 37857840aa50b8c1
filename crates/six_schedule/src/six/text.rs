//! Whitespace normalization shared by every text-extraction path.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn normalize(s: &str) -> String {
    WHITESPACE_REGEX.replace_all(s, " ").trim().to_string()
}
