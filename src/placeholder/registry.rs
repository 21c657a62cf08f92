//! Static catalog of recognized placeholder tokens.
//!
//! A registry is built once at startup and only read afterwards, so it can be
//! shared across requests behind an `Arc` without locking.
use serde::Serialize;

/// Human-readable description of one `{{name}}` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub name: String,
    pub display_label: String,
    pub description: String,
}

impl TokenDescriptor {
    pub fn new(name: &str, display_label: &str, description: &str) -> Self {
        TokenDescriptor {
            name: name.to_string(),
            display_label: display_label.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid token name '{0}': expected [A-Za-z0-9_]+")]
    InvalidName(String),
    #[error("Duplicate token name '{0}'")]
    Duplicate(String),
    #[error("Required token '{0}' is not registered")]
    UnknownRequired(String),
}

/// Token catalog plus the ordered subset of names a generated document must
/// contain.
#[derive(Debug, Clone)]
pub struct PlaceholderRegistry {
    descriptors: Vec<TokenDescriptor>,
    required: Vec<String>,
}

impl PlaceholderRegistry {
    /// Build a registry. `required` fixes the canonical order used when
    /// reporting missing tokens.
    pub fn new(descriptors: Vec<TokenDescriptor>, required: &[&str]) -> Result<Self, RegistryError> {
        for (i, d) in descriptors.iter().enumerate() {
            if !is_token_name(&d.name) {
                return Err(RegistryError::InvalidName(d.name.clone()));
            }
            if descriptors[..i].iter().any(|prev| prev.name == d.name) {
                return Err(RegistryError::Duplicate(d.name.clone()));
            }
        }
        for name in required {
            if !descriptors.iter().any(|d| d.name == *name) {
                return Err(RegistryError::UnknownRequired(name.to_string()));
            }
        }
        Ok(PlaceholderRegistry {
            descriptors,
            required: required.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// The job-posting catalog: four tokens, all required.
    pub fn job_posting() -> Self {
        let descriptors = vec![
            TokenDescriptor::new("job_title", "Job Title", "Title of the job/role"),
            TokenDescriptor::new("country", "Country", "Country where the job is located"),
            TokenDescriptor::new(
                "working_location",
                "Working Location",
                "Specific working arrangement (remote, hybrid, on-site, etc.)",
            ),
            TokenDescriptor::new(
                "contact_email",
                "Contact Email",
                "Contact email address for applicants",
            ),
        ];
        PlaceholderRegistry {
            descriptors,
            required: ["contact_email", "job_title", "country", "working_location"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TokenDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn descriptors(&self) -> &[TokenDescriptor] {
        &self.descriptors
    }

    /// Required names in canonical order.
    pub fn required_names(&self) -> &[String] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Descriptors of the required names, in canonical order.
    pub fn required_descriptors(&self) -> impl Iterator<Item = &TokenDescriptor> {
        self.required.iter().filter_map(move |name| self.get(name))
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::job_posting()
    }
}

/// `true` if `name` matches `[A-Za-z0-9_]+`.
pub fn is_token_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_posting_registry_requires_all_four_tokens_in_canonical_order() {
        let registry = PlaceholderRegistry::job_posting();
        assert_eq!(
            registry.required_names(),
            &["contact_email", "job_title", "country", "working_location"]
        );
        let labels: Vec<&str> = registry
            .required_descriptors()
            .map(|d| d.display_label.as_str())
            .collect();
        assert_eq!(labels, vec!["Contact Email", "Job Title", "Country", "Working Location"]);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let registry = PlaceholderRegistry::job_posting();
        assert!(registry.contains("job_title"));
        assert!(!registry.contains("Job_Title"));
    }

    #[test]
    fn rejects_invalid_names() {
        let err = PlaceholderRegistry::new(vec![TokenDescriptor::new("job-title", "Job", "")], &[])
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidName("job-title".into()));
    }

    #[test]
    fn rejects_duplicates_and_unknown_required_names() {
        let dup = PlaceholderRegistry::new(
            vec![TokenDescriptor::new("a", "A", ""), TokenDescriptor::new("a", "A", "")],
            &[],
        );
        assert_eq!(dup.unwrap_err(), RegistryError::Duplicate("a".into()));

        let unknown = PlaceholderRegistry::new(vec![TokenDescriptor::new("a", "A", "")], &["b"]);
        assert_eq!(unknown.unwrap_err(), RegistryError::UnknownRequired("b".into()));
    }

    #[test]
    fn optional_tokens_are_not_required() {
        let registry = PlaceholderRegistry::new(
            vec![
                TokenDescriptor::new("job_title", "Job Title", ""),
                TokenDescriptor::new("salary", "Salary", ""),
            ],
            &["job_title"],
        )
        .unwrap();
        assert!(registry.is_required("job_title"));
        assert!(!registry.is_required("salary"));
        assert!(registry.contains("salary"));
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let d = TokenDescriptor::new("country", "Country", "Where");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["displayLabel"], "Country");
    }
}
