//! Generated story value objects

use super::fallback::FALLBACK_STORY;
use serde::{Deserialize, Serialize};

/// Where a delivered story came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoryOrigin {
    /// Produced by the model and passed output validation
    Model,
    /// The fixed fallback story, with why the model output was not used
    Fallback { reason: String },
}

/// A story ready to show to the user (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub text: String,
    pub origin: StoryOrigin,
}

impl GeneratedStory {
    pub fn new(text: impl Into<String>, origin: StoryOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// The fixed fallback story
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            text: FALLBACK_STORY.to_string(),
            origin: StoryOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, StoryOrigin::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_fixed_text() {
        let story = GeneratedStory::fallback("timeout");
        assert_eq!(story.text, FALLBACK_STORY);
        assert!(story.is_fallback());
    }

    #[test]
    fn test_origin_serialization() {
        let json = serde_json::to_value(StoryOrigin::Fallback {
            reason: "too short".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fallback", "reason": "too short"}));
        assert_eq!(
            serde_json::to_value(StoryOrigin::Model).unwrap(),
            serde_json::json!({"kind": "model"})
        );
    }
}
