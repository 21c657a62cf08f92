//! Rejects malformed or unsafe free text before it reaches a provider.
//!
//! Checks run in a fixed order and the first failure wins: presence, type,
//! minimum trimmed length, maximum trimmed length, then the denylist against
//! the raw text.
use regex::RegexSet;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static SUSPICIOUS_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)javascript:",
        r"(?i)<script",
        r"(?i)onclick",
        r"(?i)onerror",
        r"(?i)eval\(",
        r"(?i)document\.",
        r"(?i)window\.",
        r"(?i)prompt\(",
        r"(?i)alert\(",
        r"(?i)confirm\(",
    ])
    .expect("Invalid denylist regex")
});

/// Length bounds and the nouns used in messages for one kind of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConstraints {
    pub subject: &'static str,
    /// Lowercase name used by the denylist message.
    pub noun: &'static str,
    pub min_len: usize,
    pub max_len: usize,
}

impl InputConstraints {
    /// Free-text request for a full document.
    pub fn document_query(max_len: usize) -> Self {
        InputConstraints {
            subject: "Job description query",
            noun: "query",
            min_len: 3,
            max_len,
        }
    }

    /// Free text used to suggest field values.
    pub fn suggestion_input(max_len: usize) -> Self {
        InputConstraints {
            subject: "Input",
            noun: "input",
            min_len: 2,
            max_len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    Empty,
    WrongType,
    TooShort,
    TooLong,
    SuspiciousContent,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{subject} is required")]
    Empty { subject: &'static str },
    #[error("{subject} must be a string")]
    WrongType { subject: &'static str },
    #[error("{subject} must be at least {min} characters long")]
    TooShort { subject: &'static str, min: usize },
    #[error("{subject} must be less than {max} characters")]
    TooLong { subject: &'static str, max: usize },
    #[error("Invalid characters detected in {noun}")]
    SuspiciousContent { noun: &'static str },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::Empty { .. } => ValidationErrorKind::Empty,
            ValidationError::WrongType { .. } => ValidationErrorKind::WrongType,
            ValidationError::TooShort { .. } => ValidationErrorKind::TooShort,
            ValidationError::TooLong { .. } => ValidationErrorKind::TooLong,
            ValidationError::SuspiciousContent { .. } => ValidationErrorKind::SuspiciousContent,
        }
    }
}

/// Serializable report of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ValidationErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Result<(), ValidationError>> for ValidationResult {
    fn from(result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult {
                valid: true,
                error_kind: None,
                message: None,
            },
            Err(e) => ValidationResult {
                valid: false,
                error_kind: Some(e.kind()),
                message: Some(e.to_string()),
            },
        }
    }
}

/// Validate an untyped request field. `None` and JSON `null` are absent;
/// any non-string value is the wrong type.
pub fn validate_value(input: Option<&Value>, constraints: &InputConstraints) -> Result<String, ValidationError> {
    match input {
        None | Some(Value::Null) => Err(ValidationError::Empty {
            subject: constraints.subject,
        }),
        Some(Value::String(text)) => validate(text, constraints).map(|_| text.clone()),
        Some(_) => Err(ValidationError::WrongType {
            subject: constraints.subject,
        }),
    }
}

pub fn validate(text: &str, constraints: &InputConstraints) -> Result<(), ValidationError> {
    let subject = constraints.subject;
    if text.is_empty() {
        return Err(ValidationError::Empty { subject });
    }
    let trimmed_len = text.trim().chars().count();
    if trimmed_len < constraints.min_len {
        return Err(ValidationError::TooShort {
            subject,
            min: constraints.min_len,
        });
    }
    if trimmed_len > constraints.max_len {
        return Err(ValidationError::TooLong {
            subject,
            max: constraints.max_len,
        });
    }
    if SUSPICIOUS_PATTERNS.is_match(text) {
        return Err(ValidationError::SuspiciousContent {
            noun: constraints.noun,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn doc() -> InputConstraints {
        InputConstraints::document_query(2000)
    }

    #[test]
    fn accepts_ordinary_query() {
        assert_eq!(validate("Senior Rust engineer, fintech, Berlin", &doc()), Ok(()));
    }

    #[test]
    fn empty_string_is_empty_not_short() {
        assert_eq!(
            validate("", &doc()).unwrap_err().kind(),
            ValidationErrorKind::Empty
        );
    }

    #[test]
    fn whitespace_only_is_too_short() {
        let err = validate("     ", &doc()).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::TooShort);
        assert_eq!(
            err.to_string(),
            "Job description query must be at least 3 characters long"
        );
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let c = InputConstraints::document_query(5);
        assert_eq!(validate("   abcde   ", &c), Ok(()));
        let err = validate("abcdef", &c).unwrap_err();
        assert_eq!(err.to_string(), "Job description query must be less than 5 characters");
    }

    #[test]
    fn denylist_is_case_insensitive() {
        for text in [
            "Engineer <SCRIPT>",
            "JavaScript: developer",
            "OnClick handler dev",
            "try Eval(x) here",
            "read Document.cookie",
            "call window.open",
            "PROMPT( please",
            "alert(1) engineer",
            "confirm( role",
            "img onerror trick",
        ] {
            assert_eq!(
                validate(text, &doc()).unwrap_err().kind(),
                ValidationErrorKind::SuspiciousContent,
                "{text}"
            );
        }
    }

    #[test]
    fn suggestion_profile_has_its_own_bounds() {
        let c = InputConstraints::suggestion_input(1000);
        assert_eq!(validate("ab", &c), Ok(()));
        assert_eq!(validate("a", &c).unwrap_err().kind(), ValidationErrorKind::TooShort);
        assert_eq!(validate(&"a".repeat(1001), &c).unwrap_err().kind(), ValidationErrorKind::TooLong);
    }

    #[test]
    fn denylist_message_names_the_input_kind() {
        let query = validate("alert(1) engineer", &doc()).unwrap_err();
        assert_eq!(query.to_string(), "Invalid characters detected in query");
        let input = validate("alert(1) engineer", &InputConstraints::suggestion_input(1000)).unwrap_err();
        assert_eq!(input.to_string(), "Invalid characters detected in input");
    }

    #[test]
    fn untyped_input_checks_presence_then_type() {
        assert_eq!(validate_value(None, &doc()).unwrap_err().kind(), ValidationErrorKind::Empty);
        assert_eq!(
            validate_value(Some(&json!(null)), &doc()).unwrap_err().kind(),
            ValidationErrorKind::Empty
        );
        let err = validate_value(Some(&json!(42)), &doc()).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::WrongType);
        assert_eq!(err.to_string(), "Job description query must be a string");
        assert_eq!(
            validate_value(Some(&json!("Nurse")), &doc()),
            Ok("Nurse".to_string())
        );
    }

    #[test]
    fn validation_result_reports_kind_and_message() {
        let result = ValidationResult::from(&validate("x", &doc()));
        assert!(!result.valid);
        assert_eq!(result.error_kind, Some(ValidationErrorKind::TooShort));
        assert!(ValidationResult::from(&validate("Nurse", &doc())).valid);
    }

    proptest! {
        #[test]
        fn short_inputs_are_too_short(s in "[a-zA-Z ]{1,2}") {
            prop_assume!(!s.is_empty());
            let err = validate(&s, &doc()).unwrap_err();
            prop_assert_eq!(err.kind(), ValidationErrorKind::TooShort);
        }

        #[test]
        fn denylisted_inputs_are_suspicious(
            prefix in "[a-zA-Z0-9 ]{0,40}",
            suffix in "[a-zA-Z0-9 ]{0,40}",
            idx in 0usize..10,
        ) {
            let patterns = [
                "javascript:", "<script", "onclick", "onerror", "eval(",
                "document.", "window.", "prompt(", "alert(", "confirm(",
            ];
            let text = format!("{prefix}{}{suffix}", patterns[idx]);
            prop_assert_eq!(
                validate(&text, &doc()),
                Err(ValidationError::SuspiciousContent { noun: "query" })
            );
        }
    }
}
