//! Domain layer for story-chat
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Slots
//!
//! A story request is built from five slots collected one per turn:
//! age group, genre, length, topic and (optionally) character names.
//! Closed-choice slots are recognised through multilingual keyword tables;
//! free-text slots go through the validation rules.
//!
//! ## Session
//!
//! A [`Session`] walks through the [`ConversationState`]s in a fixed order
//! and refuses to skip ahead. Once every slot is filled the collected
//! [`StoryParamsBuilder`] becomes an immutable [`StoryParams`].
//!
//! ## Generation output
//!
//! Model output is post-processed and validated; anything that fails is
//! replaced by the fixed [`FALLBACK_STORY`].

pub mod config;
pub mod core;
pub mod generation;
pub mod prompt;
pub mod session;
pub mod story;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::DomainError;
pub use generation::{FALLBACK_STORY, GeneratedStory, StoryOrigin};
pub use prompt::{CollectionPrompts, StoryPromptTemplate};
pub use session::{
    entities::{Message, Role, Session, SessionId},
    state::ConversationState,
};
pub use story::{AgeGroup, Genre, Slot, StoryLength, StoryParams, StoryParamsBuilder};
pub use validation::{OutputLimits, Rejection, sanitize_input};
