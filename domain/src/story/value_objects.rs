//! Story slot value objects
//!
//! The three closed-choice slots of a story request. Each has a canonical
//! string form (`"6-10"`, `"adventure"`, `"medium"`) used in serialized
//! [`StoryParams`](super::params::StoryParams) and as the lookup key for
//! prompt templates.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Target reader age band (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "3-5")]
    Toddler,
    #[serde(rename = "6-10")]
    Child,
    #[serde(rename = "11-15")]
    Teen,
}

impl AgeGroup {
    /// All age bands in canonical order
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Toddler, AgeGroup::Child, AgeGroup::Teen];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Toddler => "3-5",
            AgeGroup::Child => "6-10",
            AgeGroup::Teen => "11-15",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgeGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|age| age.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOption {
                kind: "age group",
                value: s.to_string(),
            })
    }
}

/// Story genre (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Adventure,
    Fantasy,
    Friendship,
    Educational,
    Animal,
    Family,
    Nature,
    Science,
    Mystery,
    Humor,
}

impl Genre {
    /// All genres in canonical order
    pub const ALL: [Genre; 10] = [
        Genre::Adventure,
        Genre::Fantasy,
        Genre::Friendship,
        Genre::Educational,
        Genre::Animal,
        Genre::Family,
        Genre::Nature,
        Genre::Science,
        Genre::Mystery,
        Genre::Humor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Adventure => "adventure",
            Genre::Fantasy => "fantasy",
            Genre::Friendship => "friendship",
            Genre::Educational => "educational",
            Genre::Animal => "animal",
            Genre::Family => "family",
            Genre::Nature => "nature",
            Genre::Science => "science",
            Genre::Mystery => "mystery",
            Genre::Humor => "humor",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOption {
                kind: "genre",
                value: s.to_string(),
            })
    }
}

/// Requested story length (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    Medium,
    Long,
}

impl StoryLength {
    /// All lengths in canonical order
    pub const ALL: [StoryLength; 3] = [StoryLength::Short, StoryLength::Medium, StoryLength::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
            StoryLength::Long => "long",
        }
    }
}

impl std::fmt::Display for StoryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StoryLength {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryLength::ALL
            .into_iter()
            .find(|length| length.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOption {
                kind: "length",
                value: s.to_string(),
            })
    }
}
