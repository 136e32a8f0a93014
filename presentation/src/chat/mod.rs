//! Interactive chat module
//!
//! Provides a line-editor based interface to the story conversation.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
