//! Story generation output domain.
//!
//! - [`output::GeneratedStory`]: the story delivered to a session and its origin
//! - [`postprocess`]: cleanup applied to raw model output
//! - [`fallback::FALLBACK_STORY`]: the fixed safe story

pub mod fallback;
pub mod output;
pub mod postprocess;

pub use fallback::FALLBACK_STORY;
pub use output::{GeneratedStory, StoryOrigin};
pub use postprocess::{post_process_story, strip_prompt_echo};
