//! Finds `{{name}}` tokens in text.
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `{{` + optional whitespace + identifier + optional whitespace + `}}`.
/// Capture group 1 is the bare name.
pub(crate) static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("Invalid placeholder regex")
});

/// Distinct token names present in `text`, independent of order and
/// repetition.
pub fn extract(text: &str) -> BTreeSet<String> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
