//! Domain error types

use crate::session::state::ConversationState;
use crate::story::params::Slot;
use thiserror::Error;

/// Domain-level errors
///
/// None of these are user mistakes. User input that fails a rule is a
/// [`Rejection`](crate::validation::Rejection), which becomes a reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Story parameters incomplete: missing {0}")]
    IncompleteParams(Slot),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: ConversationState,
        to: ConversationState,
    },

    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_params_display() {
        let error = DomainError::IncompleteParams(Slot::Topic);
        assert_eq!(error.to_string(), "Story parameters incomplete: missing topic");
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: ConversationState::Age,
            to: ConversationState::Topic,
        };
        assert_eq!(error.to_string(), "Invalid state transition: age -> topic");
    }

    #[test]
    fn test_unknown_option_display() {
        let error = DomainError::UnknownOption {
            kind: "genre",
            value: "opera".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown genre: opera");
    }
}
