//! Strict schema for the field-suggestions reply.
//!
//! The provider is asked for a flat JSON object with one non-empty string
//! per required token. Anything else is a typed `SchemaError`.
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::placeholder::{PlaceholderRegistry, SubstitutionMap};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Failed to parse AI response")]
    NotJson,
    #[error("Invalid suggestions format")]
    NotObject,
    #[error("Missing or invalid {0} suggestion")]
    MissingKey(String),
    #[error("Empty suggestion for {0}")]
    EmptyValue(String),
}

/// One suggested value per required token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuggestionSet(BTreeMap<String, String>);

impl SuggestionSet {
    /// Parse a raw provider reply. Keys outside the required set are dropped.
    pub fn parse(raw: &str, registry: &PlaceholderRegistry) -> Result<SuggestionSet, SchemaError> {
        let value: Value = serde_json::from_str(raw.trim()).map_err(|_| SchemaError::NotJson)?;
        let object = value.as_object().ok_or(SchemaError::NotObject)?;

        let mut values = BTreeMap::new();
        for name in registry.required_names() {
            let suggestion = object
                .get(name)
                .and_then(Value::as_str)
                .ok_or_else(|| SchemaError::MissingKey(name.clone()))?;
            if suggestion.trim().is_empty() {
                return Err(SchemaError::EmptyValue(name.clone()));
            }
            values.insert(name.clone(), suggestion.to_string());
        }
        Ok(SuggestionSet(values))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn into_substitutions(self) -> SubstitutionMap {
        self.0
    }
}
