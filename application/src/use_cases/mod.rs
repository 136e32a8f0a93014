//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_service;
pub mod generate_story;
pub mod process_turn;
