//! Single-pass `{{placeholder}}` substitution.
//!
//! Every token in the template is visited exactly once. A token whose name is
//! in the map is replaced by its value; any other token is copied through
//! verbatim. Replacement values are written straight to the output and never
//! scanned again, so a value that itself looks like `{{other}}` stays literal.
use regex::Captures;
use std::collections::BTreeMap;

use super::extractor::TOKEN_RE;

/// Token name to replacement value. May cover only some of the tokens in a
/// template.
pub type SubstitutionMap = BTreeMap<String, String>;

pub fn substitute(template: &str, values: &SubstitutionMap) -> String {
    if values.is_empty() {
        return template.to_string();
    }
    TOKEN_RE
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
