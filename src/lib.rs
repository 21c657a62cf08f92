//! Job description template library
//!
//! Modules:
//! - `placeholder`: `{{token}}` registry, extraction, completeness checks,
//!   substitution and highlighting.
//! - `input`: validation and sanitization of free-text requests.
//! - `generation`: the `GenerationService` seam and an OpenAI-compatible client.
//! - `pipeline`: per-request state machine tying the pieces together.
//! - `render`: markup-to-rich-text seam.
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `DocumentPipeline`,
//! `OpenAiClient` and `PlaceholderRegistry`.
pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod input;
pub mod pipeline;
pub mod placeholder;
pub mod render;

pub use config::Config;
pub use generation::client::OpenAiClient;
pub use pipeline::DocumentPipeline;
pub use placeholder::PlaceholderRegistry;
