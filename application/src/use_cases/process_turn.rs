//! Process Turn use case.
//!
//! One user message in, one reply and at most one state transition out.
//! The turn never fails: rejected answers become clarifying replies and an
//! inconsistent session is reset to the greeting.

use crate::ports::clock::Clock;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::json;
use std::sync::Arc;
use story_chat_domain::core::string::preview;
use story_chat_domain::story::keywords::{
    AGE_KEYWORDS, GENRE_KEYWORDS, LENGTH_KEYWORDS, NEGATIVE_KEYWORDS, RESET_KEYWORDS,
    contains_any, match_keyword,
};
use story_chat_domain::validation::{
    validate_age_group, validate_characters, validate_genre, validate_length, validate_topic,
};
use story_chat_domain::{
    CollectionPrompts, ConversationState, Session, SessionId, StoryParams, sanitize_input,
};
use tracing::{debug, error, info};

/// Result of one turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub reply: String,
    /// Set once the last slot is filled and the story can be generated
    pub params: Option<StoryParams>,
    pub complete: bool,
}

/// Reply and next state chosen by a state handler
struct Step {
    reply: String,
    next: ConversationState,
}

impl Step {
    fn to(next: ConversationState, reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            next,
        }
    }
}

/// Per-session turn processor
pub struct ProcessTurnUseCase {
    clock: Arc<dyn Clock>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ProcessTurnUseCase {
    pub fn new(clock: Arc<dyn Clock>, conversation_logger: Arc<dyn ConversationLogger>) -> Self {
        Self {
            clock,
            conversation_logger,
        }
    }

    /// Run one turn against a session the caller has locked
    pub fn execute(&self, session: &mut Session, raw_message: &str) -> TurnOutcome {
        let message = sanitize_input(raw_message);
        session.add_user_message(&message, self.clock.now());
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({
                "session_id": session.id().as_str(),
                "state": session.state().as_str(),
                "text": message,
            }),
        ));

        let from = session.state();
        let step = self.handle(session, &message);

        let mut reply = step.reply;
        if let Err(e) = session.advance(step.next) {
            error!("Session {}: {}", session.id(), e);
            session.mark_corrupted();
            reply = self.recover(session);
        }

        let mut params = None;
        if session.state() == ConversationState::Generating && from != ConversationState::Generating
        {
            match session.params().build() {
                Ok(built) => {
                    info!(
                        "Session {} complete: {} / {} / {}",
                        session.id(),
                        built.age_group(),
                        built.genre(),
                        built.length()
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "params_complete",
                        json!({
                            "session_id": session.id().as_str(),
                            "params": built,
                        }),
                    ));
                    params = Some(built);
                }
                Err(e) => {
                    error!("Session {} reached generating with bad params: {}", session.id(), e);
                    session.mark_corrupted();
                    reply = self.recover(session);
                }
            }
        }

        debug!(
            "Session {}: {} -> {} ({})",
            session.id(),
            from,
            session.state(),
            preview(&message, 40)
        );

        session.add_assistant_message(&reply, self.clock.now());
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_reply",
            json!({
                "session_id": session.id().as_str(),
                "state": session.state().as_str(),
                "text": reply,
            }),
        ));

        TurnOutcome {
            session_id: session.id().clone(),
            complete: params.is_some(),
            reply,
            params,
        }
    }

    /// Reset a corrupted session and return the apology shown to the user
    fn recover(&self, session: &mut Session) -> String {
        session.restart();
        session.add_system_message("session reset after inconsistent state", self.clock.now());
        CollectionPrompts::start_over().to_string()
    }

    fn handle(&self, session: &mut Session, message: &str) -> Step {
        match session.state() {
            ConversationState::Greeting => {
                Step::to(ConversationState::Age, CollectionPrompts::greeting())
            }
            ConversationState::Age => Self::handle_age(session, message),
            ConversationState::Genre => Self::handle_genre(session, message),
            ConversationState::Length => Self::handle_length(session, message),
            ConversationState::Topic => Self::handle_topic(session, message),
            ConversationState::Characters => Self::handle_characters(session, message),
            ConversationState::Generating => Step::to(
                ConversationState::Generating,
                CollectionPrompts::still_generating(),
            ),
            ConversationState::Done => {
                if contains_any(RESET_KEYWORDS, message) {
                    session.params_mut().clear();
                    Step::to(ConversationState::Greeting, CollectionPrompts::greeting())
                } else {
                    Step::to(ConversationState::Done, CollectionPrompts::done_reprompt())
                }
            }
            ConversationState::Corrupted => {
                error!("Session {} found in corrupted state", session.id());
                session.params_mut().clear();
                session.add_system_message("session reset after inconsistent state", self.clock.now());
                Step::to(ConversationState::Greeting, CollectionPrompts::start_over())
            }
        }
    }

    fn handle_age(session: &mut Session, message: &str) -> Step {
        if let Some(age) = match_keyword(AGE_KEYWORDS, message)
            && validate_age_group(age.as_str())
        {
            session.params_mut().set_age_group(age);
            return Step::to(ConversationState::Genre, CollectionPrompts::genre());
        }
        Step::to(ConversationState::Age, CollectionPrompts::invalid_age())
    }

    fn handle_genre(session: &mut Session, message: &str) -> Step {
        if let Some(genre) = match_keyword(GENRE_KEYWORDS, message)
            && validate_genre(genre.as_str())
        {
            session.params_mut().set_genre(genre);
            return Step::to(ConversationState::Length, CollectionPrompts::length());
        }
        Step::to(ConversationState::Genre, CollectionPrompts::invalid_genre())
    }

    fn handle_length(session: &mut Session, message: &str) -> Step {
        if let Some(length) = match_keyword(LENGTH_KEYWORDS, message)
            && validate_length(length.as_str())
        {
            session.params_mut().set_length(length);
            return Step::to(ConversationState::Topic, CollectionPrompts::topic());
        }
        Step::to(ConversationState::Length, CollectionPrompts::invalid_length())
    }

    fn handle_topic(session: &mut Session, message: &str) -> Step {
        match validate_topic(message) {
            Ok(()) => {
                session.params_mut().set_topic(message.trim());
                Step::to(ConversationState::Characters, CollectionPrompts::characters())
            }
            Err(rejection) => Step::to(
                ConversationState::Topic,
                CollectionPrompts::unsuitable_topic(&rejection.reason),
            ),
        }
    }

    fn handle_characters(session: &mut Session, message: &str) -> Step {
        if contains_any(NEGATIVE_KEYWORDS, message) {
            session.params_mut().set_no_characters();
            return Step::to(ConversationState::Generating, CollectionPrompts::generating());
        }

        let names: Vec<String> = message
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        if names.is_empty() {
            return Step::to(
                ConversationState::Characters,
                CollectionPrompts::characters_reprompt(),
            );
        }

        match validate_characters(&names) {
            Ok(()) => {
                session.params_mut().set_characters(names);
                Step::to(ConversationState::Generating, CollectionPrompts::generating())
            }
            Err(rejection) => Step::to(
                ConversationState::Characters,
                CollectionPrompts::unsuitable_characters(&rejection.reason),
            ),
        }
    }
}
