//! Text-generation seam.
//!
//! The pipeline only ever talks to a [`GenerationService`]; the HTTP client
//! in [`client`] is one implementation, tests use deterministic doubles.
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod client;
pub mod prompts;

/// Failure reported by a provider. `Call` carries the raw provider or
/// transport text, which is classified but never shown to users.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Call(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Send one system prompt plus sanitized user text, returning the
    /// provider's text reply.
    async fn submit(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerationErrorKind {
    Auth,
    RateLimit,
    Timeout,
    Network,
    Unknown,
    EmptyResponse,
    MalformedResponse,
}

/// User-safe generation failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("AI service authentication failed. Please check configuration.")]
    Auth,
    #[error("AI service rate limit exceeded. Please try again later.")]
    RateLimit,
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Network error occurred. Please check your connection and try again.")]
    Network,
    #[error("An unexpected error occurred")]
    Unknown,
    #[error("No content generated")]
    EmptyResponse,
    #[error("Failed to parse AI response")]
    MalformedResponse,
}

impl GenerationError {
    /// Map raw provider text onto a failure kind by known substrings,
    /// checked case-insensitively in priority order.
    pub fn classify(raw: &str) -> GenerationError {
        let lower = raw.to_lowercase();
        if lower.contains("api key") {
            GenerationError::Auth
        } else if lower.contains("rate limit") || lower.contains("quota") {
            GenerationError::RateLimit
        } else if lower.contains("timeout") {
            GenerationError::Timeout
        } else if lower.contains("network") || lower.contains("fetch") {
            GenerationError::Network
        } else {
            GenerationError::Unknown
        }
    }

    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::Auth => GenerationErrorKind::Auth,
            GenerationError::RateLimit => GenerationErrorKind::RateLimit,
            GenerationError::Timeout => GenerationErrorKind::Timeout,
            GenerationError::Network => GenerationErrorKind::Network,
            GenerationError::Unknown => GenerationErrorKind::Unknown,
            GenerationError::EmptyResponse => GenerationErrorKind::EmptyResponse,
            GenerationError::MalformedResponse => GenerationErrorKind::MalformedResponse,
        }
    }
}

impl From<&ProviderError> for GenerationError {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::Call(raw) => GenerationError::classify(raw),
            ProviderError::Malformed(_) => GenerationError::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_provider_messages() {
        let cases = [
            ("Incorrect API key provided: sk-***", GenerationError::Auth),
            ("Rate limit reached for gpt-4o", GenerationError::RateLimit),
            ("You exceeded your current quota", GenerationError::RateLimit),
            ("request timeout after 60s", GenerationError::Timeout),
            ("network error: connection refused", GenerationError::Network),
            ("TypeError: fetch failed", GenerationError::Network),
            ("500 Internal Server Error", GenerationError::Unknown),
        ];
        for (raw, expected) in cases {
            assert_eq!(GenerationError::classify(raw), expected, "{raw}");
        }
    }

    #[test]
    fn earlier_rules_win() {
        assert_eq!(
            GenerationError::classify("invalid API key; rate limit also hit"),
            GenerationError::Auth
        );
    }

    #[test]
    fn messages_never_echo_provider_text() {
        let raw = "Incorrect API key provided: sk-secret";
        let err = GenerationError::from(&ProviderError::Call(raw.to_string()));
        assert!(!err.to_string().contains("sk-secret"));
    }

    #[test]
    fn malformed_responses_have_their_own_kind() {
        let err = GenerationError::from(&ProviderError::Malformed("no choices".into()));
        assert_eq!(err.kind(), GenerationErrorKind::MalformedResponse);
    }
}
