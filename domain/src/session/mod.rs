//! Story session domain.
//!
//! - [`entities::Session`]: one slot-filling conversation
//! - [`entities::Message`]: a single logged message within a session
//! - [`state::ConversationState`]: the dialogue state machine's states

pub mod entities;
pub mod state;
