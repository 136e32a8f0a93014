//! Application layer for story-chat
//!
//! This crate contains use cases, port definitions, the session store and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_store;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GenerationParams, SessionConfig};
pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    story_generator::{GenerationConfig, GenerationError, StoryGenerator},
};
pub use session_store::{SessionHandle, SessionLease, SessionStore};
pub use use_cases::chat_service::{ChatReply, StoryChatError, StoryChatService};
pub use use_cases::generate_story::GenerateStoryUseCase;
pub use use_cases::process_turn::{ProcessTurnUseCase, TurnOutcome};
