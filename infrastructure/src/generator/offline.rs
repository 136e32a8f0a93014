//! Generator used when no backend is configured

use async_trait::async_trait;
use story_chat_application::{GenerationConfig, GenerationError, StoryGenerator};

/// Refuses every request, so the service always serves the fallback story
pub struct OfflineStoryGenerator;

#[async_trait]
impl StoryGenerator for OfflineStoryGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::ModelNotAvailable(
            "offline mode has no generator".to_string(),
        ))
    }

    async fn is_ready(&self) -> bool {
        false
    }

    fn model_name(&self) -> &str {
        "offline"
    }
}
