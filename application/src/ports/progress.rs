//! Progress notification port
//!
//! Story generation takes seconds; this lets the presentation layer show
//! that something is happening.

use story_chat_domain::GeneratedStory;

/// Callback for generation progress
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status line, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the generator is invoked
    fn on_generation_start(&self, model: &str);

    /// Called once a story (model output or fallback) is ready
    fn on_generation_complete(&self, story: &GeneratedStory);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_generation_start(&self, _model: &str) {}
    fn on_generation_complete(&self, _story: &GeneratedStory) {}
}
