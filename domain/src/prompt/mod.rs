//! Prompt domain
//!
//! Templates for the generation prompt and the replies used while the
//! dialogue collects story slots.

mod collection;
mod template;

pub use collection::CollectionPrompts;
pub use template::StoryPromptTemplate;
