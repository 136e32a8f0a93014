//! Validation rules for slot answers and generated stories
//!
//! Every check is a pure function. A failed check yields a [`Rejection`]
//! whose reason is shown to the user, never a system error.

use crate::core::string::char_len;
use crate::story::{AgeGroup, Genre, StoryLength};
use regex::Regex;
use std::sync::LazyLock;

pub const TOPIC_MIN_CHARS: usize = 10;
pub const TOPIC_MAX_CHARS: usize = 500;
/// Share of characters outside the topic alphabet that is still tolerated
pub const TOPIC_SPECIAL_CHAR_RATIO: f64 = 0.1;

pub const MAX_CHARACTERS: usize = 5;
pub const CHARACTER_NAME_MIN_CHARS: usize = 2;
pub const CHARACTER_NAME_MAX_CHARS: usize = 30;

/// Minimum number of sentences (longer than five characters) in a story
pub const MIN_STORY_SENTENCES: usize = 3;

/// Words that make a topic, name or story unsuitable for children
pub static INAPPROPRIATE_WORDS: &[&str] = &[
    "violence", "blood", "death", "kill", "murder", "weapon", "gun", "knife", "hate", "scary",
    "horror", "nightmare", "devil", "hell", "drug", "alcohol", "smoke", "cigarette", "sex", "war",
];

/// Diacritics accepted alongside ASCII letters
const DIACRITICS: &str = "çğıöşüÇĞIİÖŞÜ";

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// A failed validation, carrying the reason shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

pub type Validation = Result<(), Rejection>;

/// Length bounds for generated stories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 2000,
        }
    }
}

pub fn validate_age_group(value: &str) -> bool {
    value.parse::<AgeGroup>().is_ok()
}

pub fn validate_genre(value: &str) -> bool {
    value.parse::<Genre>().is_ok()
}

pub fn validate_length(value: &str) -> bool {
    value.parse::<StoryLength>().is_ok()
}

/// True when no inappropriate word occurs anywhere in `text`
pub fn is_safe_content(text: &str) -> bool {
    let lowered = text.to_lowercase();
    !INAPPROPRIATE_WORDS.iter().any(|w| lowered.contains(w))
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || DIACRITICS.contains(c)
}

fn is_topic_char(c: char) -> bool {
    is_letter(c)
        || c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '-')
}

fn is_name_char(c: char) -> bool {
    is_letter(c) || c.is_whitespace() || c == '-' || c == '\''
}

/// Check a free-text story topic
pub fn validate_topic(topic: &str) -> Validation {
    let cleaned = topic.trim();
    if cleaned.is_empty() {
        return Err(Rejection::new("Subject cannot be empty"));
    }

    let len = char_len(cleaned);
    if len < TOPIC_MIN_CHARS {
        return Err(Rejection::new(format!(
            "Subject must be at least {} characters",
            TOPIC_MIN_CHARS
        )));
    }
    if len > TOPIC_MAX_CHARS {
        return Err(Rejection::new(format!(
            "Subject can be up to {} characters",
            TOPIC_MAX_CHARS
        )));
    }

    if !is_safe_content(cleaned) {
        return Err(Rejection::new(
            "Inappropriate content detected. Choose a child-friendly topic",
        ));
    }

    let special = cleaned.chars().filter(|c| !is_topic_char(*c)).count();
    if special as f64 > len as f64 * TOPIC_SPECIAL_CHAR_RATIO {
        return Err(Rejection::new("There are too many special characters"));
    }

    Ok(())
}

/// Check a list of character names
pub fn validate_characters(names: &[String]) -> Validation {
    if names.is_empty() {
        return Ok(());
    }

    if names.len() > MAX_CHARACTERS {
        return Err(Rejection::new(format!(
            "A maximum of {} characters can be added",
            MAX_CHARACTERS
        )));
    }

    for name in names {
        let cleaned = name.trim();
        if cleaned.is_empty() {
            return Err(Rejection::new("Character name cannot be empty"));
        }

        let len = char_len(cleaned);
        if len > CHARACTER_NAME_MAX_CHARS {
            return Err(Rejection::new(format!(
                "'{}' the name is too long (max {} characters)",
                cleaned, CHARACTER_NAME_MAX_CHARS
            )));
        }
        if len < CHARACTER_NAME_MIN_CHARS {
            return Err(Rejection::new(format!(
                "'{}' the name is too short (min {} characters)",
                cleaned, CHARACTER_NAME_MIN_CHARS
            )));
        }

        if !cleaned.chars().all(is_name_char) {
            return Err(Rejection::new(format!(
                "'{}' contains invalid characters",
                cleaned
            )));
        }

        if !is_safe_content(cleaned) {
            return Err(Rejection::new(format!(
                "'{}' contains inappropriate content",
                cleaned
            )));
        }
    }

    let mut seen = std::collections::HashSet::new();
    if !names.iter().all(|n| seen.insert(n.trim().to_lowercase())) {
        return Err(Rejection::new("There can be no repeating character names"));
    }

    Ok(())
}

/// Check a generated story before it is shown
pub fn validate_story_output(story: &str, limits: &OutputLimits) -> Validation {
    let cleaned = story.trim();
    if cleaned.is_empty() {
        return Err(Rejection::new("Story is empty"));
    }

    let len = char_len(cleaned);
    if len < limits.min_chars {
        return Err(Rejection::new(format!(
            "The story is too short (min {} character)",
            limits.min_chars
        )));
    }
    if len > limits.max_chars {
        return Err(Rejection::new(format!(
            "The story is too long (max {} character)",
            limits.max_chars
        )));
    }

    if !is_safe_content(cleaned) {
        return Err(Rejection::new("The story contains inappropriate content"));
    }

    let sentences = SENTENCE_SPLIT
        .split(cleaned)
        .filter(|s| char_len(s.trim()) > 5)
        .count();
    if sentences < MIN_STORY_SENTENCES {
        return Err(Rejection::new(format!(
            "The story must contain at least {} sentences",
            MIN_STORY_SENTENCES
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ==================== Enumerations ====================

    #[test]
    fn test_enumeration_membership() {
        for age in ["3-5", "6-10", "11-15"] {
            assert!(validate_age_group(age));
        }
        assert!(!validate_age_group("0-2"));
        assert!(!validate_age_group(""));

        for genre in Genre::ALL {
            assert!(validate_genre(genre.as_str()));
        }
        assert!(!validate_genre("horror"));

        for length in ["short", "medium", "long"] {
            assert!(validate_length(length));
        }
        assert!(!validate_length("epic"));
    }

    // ==================== Topic ====================

    #[test]
    fn test_topic_length_boundary() {
        assert!(validate_topic("abcdefghi").is_err());
        assert!(validate_topic("abcdefghij").is_ok());
        assert!(validate_topic(&"a".repeat(500)).is_ok());
        assert!(validate_topic(&"a".repeat(501)).is_err());
    }

    #[test]
    fn test_topic_trimmed_before_length_check() {
        let err = validate_topic("   short    ").unwrap_err();
        assert_eq!(err.reason, "Subject must be at least 10 characters");
    }

    #[test]
    fn test_topic_empty() {
        assert_eq!(validate_topic("  ").unwrap_err().reason, "Subject cannot be empty");
    }

    #[test]
    fn test_topic_inappropriate_any_case_and_position() {
        for topic in [
            "A story about WAR heroes",
            "Kittens and a nightmare",
            "the dragon with a Gun in the end",
            "Tiny scary forest adventure",
        ] {
            let err = validate_topic(topic).unwrap_err();
            assert!(err.reason.starts_with("Inappropriate content"), "{}", topic);
        }
        // Inappropriate word short of the minimum length is still rejected
        assert!(validate_topic("gun").is_err());
    }

    #[test]
    fn test_topic_special_characters() {
        assert!(validate_topic("A brave little fox explores the forest").is_ok());
        assert!(validate_topic("Çocuk ve köpek parkta oynuyor").is_ok());
        let err = validate_topic("@@@ ### $$$ fox").unwrap_err();
        assert_eq!(err.reason, "There are too many special characters");
        // exactly 10% is tolerated
        assert!(validate_topic("abcdefghi#").is_ok());
    }

    // ==================== Characters ====================

    #[test]
    fn test_characters_count_limit() {
        let six = names(&["Ada", "Ben", "Cem", "Deniz", "Ece", "Fatma"]);
        let err = validate_characters(&six).unwrap_err();
        assert_eq!(err.reason, "A maximum of 5 characters can be added");
        assert!(validate_characters(&six[..5]).is_ok());
    }

    #[test]
    fn test_characters_duplicate_case_insensitive() {
        let err = validate_characters(&names(&["Ada", "Ben", " ada "])).unwrap_err();
        assert_eq!(err.reason, "There can be no repeating character names");
    }

    #[test]
    fn test_character_name_length_boundary() {
        assert!(validate_characters(&names(&[&"a".repeat(30)])).is_ok());
        let err = validate_characters(&names(&[&"a".repeat(31)])).unwrap_err();
        assert!(err.reason.contains("too long"));
        let err = validate_characters(&names(&["A"])).unwrap_err();
        assert!(err.reason.contains("too short"));
    }

    #[test]
    fn test_character_name_alphabet() {
        assert!(validate_characters(&names(&["Mary-Jane", "O'Neil", "Ayşe Nur"])).is_ok());
        let err = validate_characters(&names(&["R2D2"])).unwrap_err();
        assert_eq!(err.reason, "'R2D2' contains invalid characters");
    }

    #[test]
    fn test_character_name_inappropriate() {
        let err = validate_characters(&names(&["Killian"])).unwrap_err();
        assert_eq!(err.reason, "'Killian' contains inappropriate content");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = validate_characters(&names(&["Ada", "  "])).unwrap_err();
        assert_eq!(err.reason, "Character name cannot be empty");
    }

    #[test]
    fn test_empty_list_accepted() {
        assert!(validate_characters(&[]).is_ok());
    }

    // ==================== Story output ====================

    fn story_of(sentences: usize) -> String {
        (0..sentences)
            .map(|i| format!("The little fox walked along path number {}.", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_story_length_limits() {
        let limits = OutputLimits::default();
        let err = validate_story_output(&"a".repeat(50), &limits).unwrap_err();
        assert_eq!(err.reason, "The story is too short (min 100 character)");

        let long = story_of(60);
        assert!(char_len(&long) > 2000);
        assert!(validate_story_output(&long, &limits).is_err());
    }

    #[test]
    fn test_story_sentence_count() {
        let limits = OutputLimits {
            min_chars: 10,
            max_chars: 2000,
        };
        assert!(validate_story_output(&story_of(3), &limits).is_ok());
        let err = validate_story_output(&story_of(2), &limits).unwrap_err();
        assert_eq!(err.reason, "The story must contain at least 3 sentences");
        // fragments of five characters or fewer do not count
        assert!(validate_story_output("Hi. Yes. Ok. No way. Sure.", &limits).is_err());
    }

    #[test]
    fn test_story_inappropriate_content() {
        let mut story = story_of(4);
        story.push_str(" Then came the war.");
        let err = validate_story_output(&story, &OutputLimits::default()).unwrap_err();
        assert_eq!(err.reason, "The story contains inappropriate content");
    }

    #[test]
    fn test_story_empty() {
        let err = validate_story_output(" \n", &OutputLimits::default()).unwrap_err();
        assert_eq!(err.reason, "Story is empty");
    }

    // ==================== Enumeration properties ====================

    /// Arbitrary text mixed with canonical values and near misses of them
    fn arb_choice(canonical: Vec<&'static str>) -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            prop::sample::select(canonical.clone()).prop_map(str::to_string),
            prop::sample::select(canonical.clone()).prop_map(|c| c.to_uppercase()),
            (prop::sample::select(canonical), "[ a-z0-9-]{1,2}")
                .prop_map(|(c, extra)| format!("{}{}", c, extra)),
        ]
    }

    fn canonical<T>(all: &[T], name: fn(&T) -> &'static str) -> Vec<&'static str> {
        all.iter().map(name).collect()
    }

    proptest! {
        #[test]
        fn prop_age_group_accepted_iff_canonical(
            value in arb_choice(canonical(&AgeGroup::ALL, AgeGroup::as_str))
        ) {
            let listed = AgeGroup::ALL.iter().any(|a| a.as_str() == value);
            prop_assert_eq!(validate_age_group(&value), listed);
        }

        #[test]
        fn prop_genre_accepted_iff_canonical(
            value in arb_choice(canonical(&Genre::ALL, Genre::as_str))
        ) {
            let listed = Genre::ALL.iter().any(|g| g.as_str() == value);
            prop_assert_eq!(validate_genre(&value), listed);
        }

        #[test]
        fn prop_length_accepted_iff_canonical(
            value in arb_choice(canonical(&StoryLength::ALL, StoryLength::as_str))
        ) {
            let listed = StoryLength::ALL.iter().any(|l| l.as_str() == value);
            prop_assert_eq!(validate_length(&value), listed);
        }
    }
}
