//! Session domain entities

use super::state::ConversationState;
use crate::core::error::DomainError;
use crate::generation::GeneratedStory;
use crate::story::StoryParamsBuilder;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn system(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// A story-building conversation (Entity)
///
/// Holds the dialogue state, the slots collected so far and the append-only
/// message log. State changes go through [`Session::advance`], which refuses
/// transitions that skip ahead in the dialogue order.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    state: ConversationState,
    params: StoryParamsBuilder,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
    story: Option<GeneratedStory>,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            state: ConversationState::Greeting,
            params: StoryParamsBuilder::new(),
            messages: Vec::new(),
            created_at,
            story: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn params(&self) -> &StoryParamsBuilder {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut StoryParamsBuilder {
        &mut self.params
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Text of the story delivered to this session, if any
    pub fn story(&self) -> Option<&str> {
        self.story.as_ref().map(|s| s.text.as_str())
    }

    /// The full generation outcome, including whether it was a fallback
    pub fn story_result(&self) -> Option<&GeneratedStory> {
        self.story.as_ref()
    }

    /// Whether the session has outlived `ttl` at time `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at > ttl
    }

    pub fn add_user_message(&mut self, content: impl Into<String>, at: DateTime<Utc>) {
        self.messages.push(Message::user(content, at));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>, at: DateTime<Utc>) {
        self.messages.push(Message::assistant(content, at));
    }

    pub fn add_system_message(&mut self, content: impl Into<String>, at: DateTime<Utc>) {
        self.messages.push(Message::system(content, at));
    }

    /// Move to `next`, enforcing the dialogue order
    pub fn advance(&mut self, next: ConversationState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Flag the session as inconsistent; the next turn starts over
    pub fn mark_corrupted(&mut self) {
        self.state = ConversationState::Corrupted;
    }

    /// Drop collected slots and go back to the greeting
    pub fn restart(&mut self) {
        self.params.clear();
        self.state = ConversationState::Greeting;
    }

    /// Attach the generated story and finish the conversation
    pub fn complete_story(&mut self, story: GeneratedStory) -> Result<(), DomainError> {
        self.advance(ConversationState::Done)?;
        self.story = Some(story);
        Ok(())
    }
}
