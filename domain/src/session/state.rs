//! Conversation state of a story session

use serde::{Deserialize, Serialize};

/// Where a session is in the slot-filling dialogue.
///
/// The first eight variants follow the canonical order
/// greeting → age → genre → length → topic → characters → generating → done.
/// [`Corrupted`](ConversationState::Corrupted) marks a session whose state can
/// no longer be trusted; the next turn recovers it back to `Greeting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    Age,
    Genre,
    Length,
    Topic,
    Characters,
    Generating,
    Done,
    Corrupted,
}

impl ConversationState {
    /// States in canonical dialogue order
    pub const CANONICAL: [ConversationState; 8] = [
        ConversationState::Greeting,
        ConversationState::Age,
        ConversationState::Genre,
        ConversationState::Length,
        ConversationState::Topic,
        ConversationState::Characters,
        ConversationState::Generating,
        ConversationState::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Greeting => "greeting",
            ConversationState::Age => "age",
            ConversationState::Genre => "genre",
            ConversationState::Length => "length",
            ConversationState::Topic => "topic",
            ConversationState::Characters => "characters",
            ConversationState::Generating => "generating",
            ConversationState::Done => "done",
            ConversationState::Corrupted => "corrupted",
        }
    }

    /// Position in the canonical order (`None` for `Corrupted`)
    pub fn position(&self) -> Option<usize> {
        Self::CANONICAL.iter().position(|s| s == self)
    }

    /// Check a transition against the dialogue order.
    ///
    /// Allowed: staying put, moving exactly one step forward, returning to
    /// `Greeting` from anywhere, and falling into `Corrupted` from anywhere.
    pub fn can_transition_to(&self, next: ConversationState) -> bool {
        if *self == next
            || next == ConversationState::Greeting
            || next == ConversationState::Corrupted
        {
            return true;
        }
        match (self.position(), next.position()) {
            (Some(from), Some(to)) => to == from + 1,
            _ => false,
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_step_allowed() {
        for pair in ConversationState::CANONICAL.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_skipping_ahead_rejected() {
        assert!(!ConversationState::Age.can_transition_to(ConversationState::Length));
        assert!(!ConversationState::Greeting.can_transition_to(ConversationState::Generating));
        assert!(!ConversationState::Topic.can_transition_to(ConversationState::Done));
    }

    #[test]
    fn test_going_backwards_only_to_greeting() {
        assert!(ConversationState::Done.can_transition_to(ConversationState::Greeting));
        assert!(ConversationState::Topic.can_transition_to(ConversationState::Greeting));
        assert!(!ConversationState::Done.can_transition_to(ConversationState::Topic));
        assert!(!ConversationState::Genre.can_transition_to(ConversationState::Age));
    }

    #[test]
    fn test_corrupted_only_leaves_to_greeting() {
        let corrupted = ConversationState::Corrupted;
        assert!(corrupted.can_transition_to(ConversationState::Greeting));
        assert!(!corrupted.can_transition_to(ConversationState::Age));
        assert!(ConversationState::Length.can_transition_to(corrupted));
    }
}
