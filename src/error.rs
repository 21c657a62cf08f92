//! Crate-wide error type and alias.
//!
//! Domain failures (validation, generation, missing tokens) have their own
//! enums next to the code that produces them; `AppError` covers the
//! plumbing around them.
use thiserror::Error;

use crate::generation::GenerationError;
use crate::input::validator::ValidationError;
use crate::pipeline::suggestions::SchemaError;
use crate::placeholder::completeness::MissingTokenError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid substitution '{0}', expected NAME=VALUE")]
    InvalidSubstitution(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Typed cause of a failed document request, one variant per failure state
/// of the request state machine.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    MissingTokens(#[from] MissingTokenError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

