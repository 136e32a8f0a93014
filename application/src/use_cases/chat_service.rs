//! Story chat service.
//!
//! The entry point outer layers talk to. It owns the [`SessionStore`] and
//! wires the turn processor and the story generator together:
//!
//! 1. [`process_turn`](StoryChatService::process_turn) resolves the session
//!    (creating one for an unknown or expired id) and runs one turn under
//!    the session lock
//! 2. when the turn completes the parameters, the caller generates the
//!    story without holding any lock
//! 3. [`set_story`](StoryChatService::set_story) attaches it and moves the
//!    session to `done`
//!
//! [`chat`](StoryChatService::chat) runs all three steps for one message and
//! keeps the session leased throughout, so expiry cannot evict it while the
//! story is being written.

use crate::config::{GenerationParams, SessionConfig};
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ProgressNotifier;
use crate::ports::story_generator::StoryGenerator;
use crate::session_store::{SessionLease, SessionStore};
use crate::use_cases::generate_story::GenerateStoryUseCase;
use crate::use_cases::process_turn::{ProcessTurnUseCase, TurnOutcome};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use story_chat_domain::{DomainError, GeneratedStory, Session, SessionId, StoryParams};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors returned by [`StoryChatService`] operations that can fail.
///
/// Turns themselves never fail; these only come from `set_story`.
#[derive(Error, Debug, PartialEq)]
pub enum StoryChatError {
    #[error("Unknown or expired session: {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Reply for one message of the full chat flow
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub session_id: SessionId,
    pub reply: String,
    pub params: Option<StoryParams>,
    /// Present on the turn that completed the parameters
    pub story: Option<GeneratedStory>,
    pub complete: bool,
}

pub struct StoryChatService {
    store: SessionStore,
    turns: ProcessTurnUseCase,
    generation: GenerateStoryUseCase,
    clock: Arc<dyn Clock>,
    conversation_logger: Arc<dyn ConversationLogger>,
    session_config: SessionConfig,
}

impl StoryChatService {
    pub fn new(
        generator: Arc<dyn StoryGenerator>,
        session_config: SessionConfig,
        generation_params: GenerationParams,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let logger: Arc<dyn ConversationLogger> = Arc::new(NoConversationLogger);
        Self {
            store: SessionStore::with_clock(session_config.ttl_chrono(), clock.clone()),
            turns: ProcessTurnUseCase::new(clock.clone(), logger.clone()),
            generation: GenerateStoryUseCase::new(generator, generation_params),
            clock,
            conversation_logger: logger,
            session_config,
        }
    }

    /// Replace the clock. Call before the first session is created.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.store = SessionStore::with_clock(self.session_config.ttl_chrono(), clock.clone());
        self.turns = ProcessTurnUseCase::new(clock.clone(), self.conversation_logger.clone());
        self.clock = clock;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.turns = ProcessTurnUseCase::new(self.clock.clone(), logger.clone());
        self.generation = self.generation.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    pub fn generation_params(&self) -> &GenerationParams {
        self.generation.params()
    }

    /// Check out the session for `session_id`, or open a new one
    fn resolve(&self, session_id: Option<&str>) -> SessionLease {
        if let Some(raw) = session_id {
            let id = SessionId::from(raw);
            if let Some(lease) = self.store.lease(&id) {
                return lease;
            }
            debug!("Session {} unknown or expired, starting a new one", id);
        }
        self.store.create_leased()
    }

    fn run_turn(&self, lease: &SessionLease, message: &str) -> TurnOutcome {
        let mut session = lease.lock();
        self.turns.execute(&mut session, message)
    }

    /// Run one turn of the dialogue
    pub fn process_turn(&self, session_id: Option<&str>, message: &str) -> TurnOutcome {
        let lease = self.resolve(session_id);
        self.run_turn(&lease, message)
    }

    /// Attach a generated story to a session that is generating
    pub fn set_story(
        &self,
        session_id: &SessionId,
        story: GeneratedStory,
    ) -> Result<(), StoryChatError> {
        let lease = self
            .store
            .lease(session_id)
            .ok_or_else(|| StoryChatError::UnknownSession(session_id.clone()))?;
        self.attach_story(&lease, story)
    }

    fn attach_story(
        &self,
        lease: &SessionLease,
        story: GeneratedStory,
    ) -> Result<(), StoryChatError> {
        let mut session = lease.lock();
        let session_id = session.id().clone();

        let text = story.text.clone();
        let fallback = story.is_fallback();
        session.complete_story(story)?;
        session.add_assistant_message(text, self.clock.now());

        self.conversation_logger.log(ConversationEvent::new(
            "story_delivered",
            json!({
                "session_id": session_id.as_str(),
                "fallback": fallback,
            }),
        ));
        info!("Session {} done (fallback: {})", session_id, fallback);
        Ok(())
    }

    /// Build the prompt for `params` and generate a story
    pub async fn generate_story(
        &self,
        params: &StoryParams,
        progress: &dyn ProgressNotifier,
    ) -> GeneratedStory {
        self.generation.execute_for(params, progress).await
    }

    /// Full flow for one message: run the turn and, when it completes the
    /// parameters, generate the story and attach it
    pub async fn chat(
        &self,
        session_id: Option<&str>,
        message: &str,
        progress: &dyn ProgressNotifier,
    ) -> ChatReply {
        let lease = self.resolve(session_id);
        let outcome = self.run_turn(&lease, message);

        let story = match &outcome.params {
            Some(params) => {
                let story = self.generate_story(params, progress).await;
                if let Err(e) = self.attach_story(&lease, story.clone()) {
                    warn!("Could not attach story to {}: {}", outcome.session_id, e);
                }
                Some(story)
            }
            None => None,
        };

        ChatReply {
            session_id: outcome.session_id,
            reply: outcome.reply,
            params: outcome.params,
            story,
            complete: outcome.complete,
        }
    }

    /// Evict expired sessions now; returns how many were removed
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep()
    }

    /// Sweep expired sessions every `interval` until `token` is cancelled
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        interval: Duration,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Session sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = service.sweep_expired();
                        if removed > 0 {
                            info!("Expired {} session(s)", removed);
                        }
                    }
                }
            }
        })
    }

    pub async fn is_model_ready(&self) -> bool {
        self.generation.generator().is_ready().await
    }

    pub fn model_name(&self) -> String {
        self.generation.generator().model_name().to_string()
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Copy of a live session, for status display
    pub fn session_snapshot(&self, session_id: &SessionId) -> Option<Session> {
        let lease = self.store.lease(session_id)?;
        let session = lease.lock().clone();
        Some(session)
    }
}
