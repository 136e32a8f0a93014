//! Normalisation of raw user text
//!
//! Applied to every inbound message before the dialogue looks at it.

use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static DISALLOWED_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,!?;:\-'"]"#).expect("valid regex"));

static PUNCTUATION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]{3,}").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Clean a user message.
///
/// Strips `<...>` tags, removes characters other than word characters
/// (Unicode, so diacritics survive), whitespace and `. , ! ? ; : - ' "`,
/// shortens runs of three or more `.`, `!`, `?` to exactly three, then
/// collapses whitespace and trims.
///
/// The result is never longer than the input, and cleaning it again
/// returns it unchanged.
pub fn sanitize_input(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = HTML_TAG.replace_all(text, "");
    let text = DISALLOWED_CHAR.replace_all(&text, "");
    let text = PUNCTUATION_RUN.replace_all(&text, |caps: &regex::Captures| {
        caps[0].chars().last().map(|c| c.to_string().repeat(3)).unwrap_or_default()
    });
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    text.trim().to_string()
}
