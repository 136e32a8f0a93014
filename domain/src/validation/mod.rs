//! Input validation and sanitization.
//!
//! - [`sanitize`]: normalisation applied to every inbound message
//! - [`rules`]: per-slot checks and the generated-story check

pub mod rules;
pub mod sanitize;

pub use rules::{
    INAPPROPRIATE_WORDS, OutputLimits, Rejection, Validation, is_safe_content,
    validate_age_group, validate_characters, validate_genre, validate_length,
    validate_story_output, validate_topic,
};
pub use sanitize::sanitize_input;
