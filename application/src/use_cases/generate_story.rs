//! Generate Story use case.
//!
//! Turns a finished [`StoryParams`] into story text. The generator is
//! untrusted: its output is cleaned up and validated, and anything that goes
//! wrong (error, timeout, rejected text) yields the fixed fallback story.
//! This use case therefore never fails.

use crate::config::GenerationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::story_generator::{GenerationError, StoryGenerator};
use serde_json::json;
use std::sync::Arc;
use story_chat_domain::core::string::char_len;
use story_chat_domain::generation::{post_process_story, strip_prompt_echo};
use story_chat_domain::validation::validate_story_output;
use story_chat_domain::{GeneratedStory, StoryOrigin, StoryParams, StoryPromptTemplate};
use tracing::{debug, info, warn};

/// Use case for generating one story.
pub struct GenerateStoryUseCase {
    generator: Arc<dyn StoryGenerator>,
    params: GenerationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for GenerateStoryUseCase {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl GenerateStoryUseCase {
    pub fn new(generator: Arc<dyn StoryGenerator>, params: GenerationParams) -> Self {
        Self {
            generator,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn generator(&self) -> &Arc<dyn StoryGenerator> {
        &self.generator
    }

    /// Build the prompt for `story_params` and generate from it
    pub async fn execute_for(
        &self,
        story_params: &StoryParams,
        progress: &dyn ProgressNotifier,
    ) -> GeneratedStory {
        let prompt = StoryPromptTemplate::build_story_prompt(story_params);
        self.execute(&prompt, progress).await
    }

    /// Generate from a prepared prompt, falling back on any failure
    pub async fn execute(&self, prompt: &str, progress: &dyn ProgressNotifier) -> GeneratedStory {
        progress.on_generation_start(self.generator.model_name());
        info!(
            "Generating story with {} ({} prompt chars)",
            self.generator.model_name(),
            char_len(prompt)
        );

        let story = match self.call_generator(prompt).await {
            Ok(raw) => self.accept(&raw, prompt),
            Err(e) => {
                warn!("Story generation failed: {}", e);
                GeneratedStory::fallback(e.to_string())
            }
        };

        if let StoryOrigin::Fallback { reason } = &story.origin {
            info!("Serving fallback story ({})", reason);
        } else {
            info!("Story generated ({} chars)", char_len(&story.text));
        }

        self.conversation_logger.log(ConversationEvent::new(
            "story_generated",
            json!({
                "model": self.generator.model_name(),
                "origin": story.origin,
                "chars": char_len(&story.text),
            }),
        ));

        progress.on_generation_complete(&story);
        story
    }

    async fn call_generator(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = self.generator.generate(prompt, &self.params.sampling);
        match tokio::time::timeout(self.params.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout),
        }
    }

    /// Clean up raw model output and keep it only if it passes validation
    fn accept(&self, raw: &str, prompt: &str) -> GeneratedStory {
        let continuation = strip_prompt_echo(raw, prompt);
        let story = post_process_story(continuation);
        debug!("Post-processed story: {} chars", char_len(&story));

        match validate_story_output(&story, &self.params.limits) {
            Ok(()) => GeneratedStory::new(story, StoryOrigin::Model),
            Err(rejection) => {
                warn!("Generated story rejected: {}", rejection);
                GeneratedStory::fallback(rejection.reason)
            }
        }
    }

    /// Generate without progress callbacks
    pub async fn execute_quiet(&self, prompt: &str) -> GeneratedStory {
        self.execute(prompt, &NoProgress).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ports::story_generator::GenerationConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use story_chat_domain::validation::is_safe_content;
    use story_chat_domain::{AgeGroup, FALLBACK_STORY, Genre, StoryLength};

    pub(crate) const GOOD_STORY: &str = "Once upon a time a small fox lived at the edge of a quiet forest. \
        Every morning she counted the birds that sang in the tall trees. \
        One day she found a lost puppy and walked him home across the hill. \
        The puppy's family thanked her and they became the best of friends.";

    /// Generator returning a scripted reply
    pub(crate) struct ScriptedGenerator {
        pub reply: Result<String, String>,
        pub delay: Option<Duration>,
        pub calls: AtomicUsize,
        pub last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedGenerator {
        pub fn ok(text: impl Into<String>) -> Self {
            Self {
                reply: Ok(text.into()),
                delay: None,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                ..Self::ok("")
            }
        }

        pub fn slow(text: impl Into<String>, delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::ok(text)
            }
        }
    }

    #[async_trait]
    impl StoryGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply
                .clone()
                .map_err(GenerationError::ConnectionError)
        }

        async fn is_ready(&self) -> bool {
            self.reply.is_ok()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct CountingProgress {
        started: AtomicUsize,
        completed: AtomicUsize,
    }

    impl ProgressNotifier for CountingProgress {
        fn on_generation_start(&self, _model: &str) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }
        fn on_generation_complete(&self, _story: &GeneratedStory) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn use_case(generator: ScriptedGenerator) -> GenerateStoryUseCase {
        GenerateStoryUseCase::new(Arc::new(generator), GenerationParams::default())
    }

    fn params() -> StoryParams {
        StoryParams::new(
            AgeGroup::Child,
            Genre::Friendship,
            StoryLength::Short,
            "A fox who helps a lost puppy",
            None,
        )
    }

    #[tokio::test]
    async fn test_valid_output_is_kept() {
        let uc = use_case(ScriptedGenerator::ok(GOOD_STORY));
        let story = uc.execute_quiet("prompt").await;
        assert_eq!(story.origin, StoryOrigin::Model);
        assert!(story.text.starts_with("Once upon a time"));
        assert!(!story.is_fallback());
    }

    #[tokio::test]
    async fn test_prompt_echo_is_stripped() {
        let prompt = "Write a story.\n\nNow write the story:";
        let uc = use_case(ScriptedGenerator::ok(format!("{}\n{}", prompt, GOOD_STORY)));
        let story = uc.execute_quiet(prompt).await;
        assert_eq!(story.origin, StoryOrigin::Model);
        assert!(!story.text.contains("Now write the story:"));
    }

    #[tokio::test]
    async fn test_generator_error_falls_back() {
        let uc = use_case(ScriptedGenerator::failing("refused"));
        let story = uc.execute_quiet("prompt").await;
        assert!(story.is_fallback());
        assert_eq!(story.text, FALLBACK_STORY);
        assert!(validate_story_output(&story.text, &uc.params().limits).is_ok());
    }

    #[tokio::test]
    async fn test_short_output_falls_back() {
        let uc = use_case(ScriptedGenerator::ok("The end."));
        let story = uc.execute_quiet("prompt").await;
        assert!(story.is_fallback());
        match story.origin {
            StoryOrigin::Fallback { reason } => assert!(reason.contains("too short")),
            StoryOrigin::Model => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn test_unsafe_output_falls_back() {
        let text = GOOD_STORY.replace("lost puppy", "monster with a gun");
        let uc = use_case(ScriptedGenerator::ok(text));
        let story = uc.execute_quiet("prompt").await;
        assert!(story.is_fallback());
        assert!(is_safe_content(&story.text));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let generator = ScriptedGenerator::slow(GOOD_STORY, Duration::from_secs(600));
        let uc = GenerateStoryUseCase::new(
            Arc::new(generator),
            GenerationParams::default().with_timeout(Duration::from_secs(1)),
        );
        let story = uc.execute_quiet("prompt").await;
        assert!(story.is_fallback());
        assert_eq!(
            story.origin,
            StoryOrigin::Fallback {
                reason: "Timeout".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_execute_for_builds_prompt() {
        let generator = Arc::new(ScriptedGenerator::ok(GOOD_STORY));
        let uc = GenerateStoryUseCase::new(generator.clone(), GenerationParams::default());
        let progress = CountingProgress {
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        };

        uc.execute_for(&params(), &progress).await;

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("TOPIC: A fox who helps a lost puppy"));
        assert!(prompt.ends_with("Now write the story:"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(progress.started.load(Ordering::SeqCst), 1);
        assert_eq!(progress.completed.load(Ordering::SeqCst), 1);
    }
}
