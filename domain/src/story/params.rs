//! Story parameters and their slot-by-slot builder

use super::value_objects::{AgeGroup, Genre, StoryLength};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One structured parameter collected during the dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    AgeGroup,
    Genre,
    Length,
    Topic,
    Characters,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::AgeGroup => "age_group",
            Slot::Genre => "genre",
            Slot::Length => "length",
            Slot::Topic => "topic",
            Slot::Characters => "characters",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete, validated story request (Value Object)
///
/// Only produced by [`StoryParamsBuilder::build`] once every slot has been
/// filled, or directly from already-typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryParams {
    age_group: AgeGroup,
    genre: Genre,
    length: StoryLength,
    topic: String,
    characters: Option<Vec<String>>,
}

impl StoryParams {
    pub fn new(
        age_group: AgeGroup,
        genre: Genre,
        length: StoryLength,
        topic: impl Into<String>,
        characters: Option<Vec<String>>,
    ) -> Self {
        Self {
            age_group,
            genre,
            length,
            topic: topic.into(),
            characters,
        }
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn length(&self) -> StoryLength {
        self.length
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Named characters, if the user asked for any
    pub fn characters(&self) -> Option<&[String]> {
        self.characters.as_deref()
    }
}

/// Accumulates slot values as the conversation progresses.
///
/// The characters slot is tri-state: not yet answered, answered "none",
/// or answered with a list of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryParamsBuilder {
    age_group: Option<AgeGroup>,
    genre: Option<Genre>,
    length: Option<StoryLength>,
    topic: Option<String>,
    characters: Option<Option<Vec<String>>>,
}

impl StoryParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_age_group(&mut self, age_group: AgeGroup) {
        self.age_group = Some(age_group);
    }

    pub fn set_genre(&mut self, genre: Genre) {
        self.genre = Some(genre);
    }

    pub fn set_length(&mut self, length: StoryLength) {
        self.length = Some(length);
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = Some(topic.into());
    }

    pub fn set_characters(&mut self, names: Vec<String>) {
        self.characters = Some(Some(names));
    }

    pub fn set_no_characters(&mut self) {
        self.characters = Some(None);
    }

    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age_group
    }

    pub fn genre(&self) -> Option<Genre> {
        self.genre
    }

    pub fn length(&self) -> Option<StoryLength> {
        self.length
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Whether the given slot has been accepted
    pub fn is_filled(&self, slot: Slot) -> bool {
        match slot {
            Slot::AgeGroup => self.age_group.is_some(),
            Slot::Genre => self.genre.is_some(),
            Slot::Length => self.length.is_some(),
            Slot::Topic => self.topic.is_some(),
            Slot::Characters => self.characters.is_some(),
        }
    }

    /// Slots that are still empty, in dialogue order
    pub fn missing(&self) -> Vec<Slot> {
        [
            Slot::AgeGroup,
            Slot::Genre,
            Slot::Length,
            Slot::Topic,
            Slot::Characters,
        ]
        .into_iter()
        .filter(|slot| !self.is_filled(*slot))
        .collect()
    }

    /// Forget everything collected so far
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Produce the final parameters, or name the first missing slot
    pub fn build(&self) -> Result<StoryParams, DomainError> {
        let age_group = self
            .age_group
            .ok_or(DomainError::IncompleteParams(Slot::AgeGroup))?;
        let genre = self.genre.ok_or(DomainError::IncompleteParams(Slot::Genre))?;
        let length = self
            .length
            .ok_or(DomainError::IncompleteParams(Slot::Length))?;
        let topic = self
            .topic
            .clone()
            .ok_or(DomainError::IncompleteParams(Slot::Topic))?;
        let characters = self
            .characters
            .clone()
            .ok_or(DomainError::IncompleteParams(Slot::Characters))?;

        Ok(StoryParams {
            age_group,
            genre,
            length,
            topic,
            characters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_builder() -> StoryParamsBuilder {
        let mut builder = StoryParamsBuilder::new();
        builder.set_age_group(AgeGroup::Child);
        builder.set_genre(Genre::Adventure);
        builder.set_length(StoryLength::Medium);
        builder.set_topic("A brave little fox explores the forest");
        builder
    }

    #[test]
    fn test_build_requires_characters_answer() {
        let builder = filled_builder();
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::IncompleteParams(Slot::Characters)
        );
    }

    #[test]
    fn test_build_with_no_characters() {
        let mut builder = filled_builder();
        builder.set_no_characters();
        let params = builder.build().unwrap();
        assert_eq!(params.age_group(), AgeGroup::Child);
        assert_eq!(params.topic(), "A brave little fox explores the forest");
        assert!(params.characters().is_none());
    }

    #[test]
    fn test_build_reports_first_missing_slot() {
        let mut builder = StoryParamsBuilder::new();
        builder.set_genre(Genre::Fantasy);
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::IncompleteParams(Slot::AgeGroup)
        );
        assert_eq!(
            builder.missing(),
            vec![Slot::AgeGroup, Slot::Length, Slot::Topic, Slot::Characters]
        );
    }

    #[test]
    fn test_clear_resets_all_slots() {
        let mut builder = filled_builder();
        builder.set_characters(vec!["Ada".to_string()]);
        builder.clear();
        assert_eq!(builder, StoryParamsBuilder::default());
    }

    #[test]
    fn test_serialized_shape() {
        let mut builder = filled_builder();
        builder.set_no_characters();
        let json = serde_json::to_value(builder.build().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "age_group": "6-10",
                "genre": "adventure",
                "length": "medium",
                "topic": "A brave little fox explores the forest",
                "characters": null
            })
        );
    }
}
