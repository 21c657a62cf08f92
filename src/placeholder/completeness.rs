//! Required-token completeness check.
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::registry::{PlaceholderRegistry, TokenDescriptor};

/// A generated document lacks required tokens. Carries the generated text so
/// a caller can retry or fill the fields by hand.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Generated job description is missing required placeholder tokens")]
pub struct MissingTokenError {
    pub raw_text: String,
    pub missing: Vec<TokenDescriptor>,
}

/// Result of checking one generated text against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub raw_text: String,
    pub present_tokens: BTreeSet<String>,
    pub missing_tokens: Vec<TokenDescriptor>,
}

impl GenerationOutcome {
    pub fn is_complete(&self) -> bool {
        self.missing_tokens.is_empty()
    }

    /// Complete outcomes pass through; incomplete ones become a
    /// `MissingTokenError`.
    pub fn into_result(self) -> Result<GenerationOutcome, MissingTokenError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(MissingTokenError {
                raw_text: self.raw_text,
                missing: self.missing_tokens,
            })
        }
    }
}

/// Required descriptors absent from `present`, in the registry's required
/// order.
pub fn check(present: &BTreeSet<String>, registry: &PlaceholderRegistry) -> Vec<TokenDescriptor> {
    registry
        .required_descriptors()
        .filter(|d| !present.contains(&d.name))
        .cloned()
        .collect()
}

/// Extract and check in one step.
pub fn inspect(raw_text: String, registry: &PlaceholderRegistry) -> GenerationOutcome {
    let present_tokens = super::extractor::extract(&raw_text);
    let missing_tokens = check(&present_tokens, registry);
    GenerationOutcome {
        raw_text,
        present_tokens,
        missing_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(missing: &[TokenDescriptor]) -> Vec<&str> {
        missing.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn complete_when_every_required_token_is_present() {
        let registry = PlaceholderRegistry::job_posting();
        let outcome = inspect(
            "# {{job_title}}\n{{working_location}}, {{country}}\nAsk {{contact_email}}".into(),
            &registry,
        );
        assert!(outcome.is_complete());
        assert_eq!(outcome.present_tokens.len(), 4);
    }

    #[test]
    fn missing_follows_required_order_not_text_order() {
        let registry = PlaceholderRegistry::job_posting();
        let present = BTreeSet::from(["country".to_string()]);
        let missing = check(&present, &registry);
        assert_eq!(names(&missing), vec!["contact_email", "job_title", "working_location"]);
    }

    #[test]
    fn extra_tokens_do_not_affect_completeness() {
        let registry = PlaceholderRegistry::job_posting();
        let outcome = inspect(
            "{{job_title}} {{country}} {{working_location}} {{contact_email}} {{salary}}".into(),
            &registry,
        );
        assert!(outcome.is_complete());
        assert!(outcome.present_tokens.contains("salary"));
    }

    #[test]
    fn incomplete_outcome_keeps_raw_text() {
        let registry = PlaceholderRegistry::job_posting();
        let text = "{{job_title}} in {{country}} ({{working_location}})".to_string();
        let err = inspect(text.clone(), &registry).into_result().unwrap_err();
        assert_eq!(err.raw_text, text);
        assert_eq!(names(&err.missing), vec!["contact_email"]);
        assert_eq!(err.missing[0].display_label, "Contact Email");
    }
}
