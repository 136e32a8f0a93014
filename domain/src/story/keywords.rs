//! Multilingual keyword tables for the closed-choice slots
//!
//! Matching is case-insensitive substring search. Tables are scanned in
//! declaration order and the first entry with any matching keyword wins,
//! so when keywords overlap (a message like "11-15" also contains "5")
//! the earlier entry takes it.

use super::value_objects::{AgeGroup, Genre, StoryLength};

/// A keyword table: each value with the phrases that select it
pub type KeywordTable<T> = [(T, &'static [&'static str])];

pub static AGE_KEYWORDS: &KeywordTable<AgeGroup> = &[
    (
        AgeGroup::Toddler,
        &["3-5", "3", "4", "5", "üç", "dört", "beş", "küçük"],
    ),
    (
        AgeGroup::Child,
        &[
            "6-10", "6", "7", "8", "9", "10", "altı", "yedi", "sekiz", "orta",
        ],
    ),
    (
        AgeGroup::Teen,
        &[
            "11-15", "11", "12", "13", "14", "15", "onbir", "oniki", "büyük",
        ],
    ),
];

pub static GENRE_KEYWORDS: &KeywordTable<Genre> = &[
    (Genre::Adventure, &["macera", "adventure", "serüven"]),
    (Genre::Fantasy, &["fantastik", "fantasy", "sihir", "büyü"]),
    (Genre::Friendship, &["arkadaşlık", "friendship", "arkadaş"]),
    (Genre::Educational, &["eğitici", "educational", "öğretici"]),
    (Genre::Animal, &["hayvan", "animal"]),
    (Genre::Family, &["aile", "family"]),
    (Genre::Nature, &["doğa", "nature"]),
    (Genre::Science, &["bilim", "science"]),
    (Genre::Mystery, &["gizem", "mystery", "sır"]),
    (Genre::Humor, &["komedi", "humor", "komik", "eğlenceli"]),
];

pub static LENGTH_KEYWORDS: &KeywordTable<StoryLength> = &[
    (StoryLength::Short, &["kısa", "short", "kisa"]),
    (StoryLength::Medium, &["orta", "medium"]),
    (StoryLength::Long, &["uzun", "long"]),
];

/// Replies meaning "no named characters"
pub static NEGATIVE_KEYWORDS: &[&str] = &["hayır", "yok", "no", "istemiyorum", "none"];

/// Replies that start a new story once one is done
pub static RESET_KEYWORDS: &[&str] = &["new", "yeni"];

/// Return the first table entry with a keyword contained in `text`
pub fn match_keyword<T: Copy>(table: &KeywordTable<T>, text: &str) -> Option<T> {
    let lowered = text.trim().to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(value, _)| *value)
}

/// Whether `text` contains any of `keywords`, ignoring case
pub fn contains_any(keywords: &[&str], text: &str) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}
