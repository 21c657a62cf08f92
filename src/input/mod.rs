//! Free-text input handling: validation, then sanitization.
pub mod sanitizer;
pub mod validator;

pub use sanitizer::sanitize;
pub use validator::{validate, validate_value, InputConstraints, ValidationError, ValidationResult};
