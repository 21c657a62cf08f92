//! Per-request state machine.
//!
//! ```text
//! Pending -> Validating -> FailedValidation
//!                       -> Sanitized -> Generating -> FailedGeneration
//!                                                  -> Generated -> CheckingTokens -> FailedMissingTokens
//!                                                                                 -> Complete
//! ```
//!
//! `CheckingTokens -> Generating` is only taken when a corrective retry is
//! configured.
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Validating,
    FailedValidation,
    Sanitized,
    Generating,
    FailedGeneration,
    Generated,
    CheckingTokens,
    FailedMissingTokens,
    Complete,
}

impl RequestState {
    pub fn can_transition_to(self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Pending, Validating)
                | (Validating, FailedValidation)
                | (Validating, Sanitized)
                | (Sanitized, Generating)
                | (Generating, FailedGeneration)
                | (Generating, Generated)
                | (Generated, CheckingTokens)
                | (CheckingTokens, FailedMissingTokens)
                | (CheckingTokens, Complete)
                | (CheckingTokens, Generating)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::FailedValidation
                | RequestState::FailedGeneration
                | RequestState::FailedMissingTokens
                | RequestState::Complete
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Pending => "PENDING",
            RequestState::Validating => "VALIDATING",
            RequestState::FailedValidation => "FAILED_VALIDATION",
            RequestState::Sanitized => "SANITIZED",
            RequestState::Generating => "GENERATING",
            RequestState::FailedGeneration => "FAILED_GENERATION",
            RequestState::Generated => "GENERATED",
            RequestState::CheckingTokens => "CHECKING_TOKENS",
            RequestState::FailedMissingTokens => "FAILED_MISSING_TOKENS",
            RequestState::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// Tracks one request through the state machine and logs each step.
#[derive(Debug)]
pub struct RequestTracker {
    id: Uuid,
    state: RequestState,
    history: Vec<RequestState>,
}

impl RequestTracker {
    pub fn new() -> Self {
        RequestTracker {
            id: Uuid::new_v4(),
            state: RequestState::Pending,
            history: vec![RequestState::Pending],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn history(&self) -> &[RequestState] {
        &self.history
    }

    pub fn advance(&mut self, next: RequestState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(request_id = %self.id, from = %self.state, to = %next, "request state change");
        self.state = next;
        self.history.push(next);
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}
