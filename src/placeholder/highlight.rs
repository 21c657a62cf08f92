//! Marks placeholders that are still unresolved after substitution.
use regex::Captures;
use std::collections::BTreeSet;

use super::extractor::TOKEN_RE;

/// Wrapper written around each unresolved token. The token is normalised to
/// `{{name}}` between `open` and `close`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl HighlightMarker {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        HighlightMarker {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for HighlightMarker {
    /// A yellow "pending" span.
    fn default() -> Self {
        HighlightMarker::new(
            r#"<span class="placeholder-pending" style="background-color: yellow;">"#,
            "</span>",
        )
    }
}

/// Highlighted markup plus the names that were left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub markup: String,
    pub unresolved_tokens: BTreeSet<String>,
}

/// Wrap every remaining `{{name}}` in the default marker.
pub fn highlight(text: &str) -> String {
    highlight_with(text, &HighlightMarker::default()).markup
}

pub fn highlight_with(text: &str, marker: &HighlightMarker) -> RenderedDocument {
    let mut unresolved_tokens = BTreeSet::new();
    let markup = TOKEN_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            unresolved_tokens.insert(name.to_string());
            format!("{}{{{{{}}}}}{}", marker.open, name, marker.close)
        })
        .into_owned();
    RenderedDocument {
        markup,
        unresolved_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::substitution::{substitute, SubstitutionMap};

    fn marker() -> HighlightMarker {
        HighlightMarker::new("<marker>", "</marker>")
    }

    #[test]
    fn wraps_remaining_tokens_after_substitution() {
        let values = SubstitutionMap::from([("job_title".to_string(), "Data Scientist".to_string())]);
        let substituted = substitute("Title: {{job_title}} Location: {{country}}", &values);
        let doc = highlight_with(&substituted, &marker());
        assert_eq!(
            doc.markup,
            "Title: Data Scientist Location: <marker>{{country}}</marker>"
        );
        assert_eq!(doc.unresolved_tokens, BTreeSet::from(["country".to_string()]));
    }

    #[test]
    fn normalises_inner_whitespace() {
        let doc = highlight_with("{{  country }}", &marker());
        assert_eq!(doc.markup, "<marker>{{country}}</marker>");
    }

    #[test]
    fn every_occurrence_is_wrapped_once() {
        let doc = highlight_with("{{a}} and {{a}}", &marker());
        assert_eq!(doc.markup, "<marker>{{a}}</marker> and <marker>{{a}}</marker>");
        assert_eq!(doc.markup.matches("<marker>").count(), 2);
    }

    #[test]
    fn text_without_tokens_passes_through() {
        let doc = highlight_with("Nothing to see", &marker());
        assert_eq!(doc.markup, "Nothing to see");
        assert!(doc.unresolved_tokens.is_empty());
    }

    #[test]
    fn default_marker_is_a_pending_span() {
        let out = highlight("{{country}}");
        assert!(out.starts_with("<span class=\"placeholder-pending\""));
        assert!(out.ends_with("{{country}}</span>"));
    }
}
