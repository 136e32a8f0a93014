//! Cleanup of raw model output before validation

use regex::Regex;
use std::sync::LazyLock;

static MISSING_SPACE_AFTER_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").expect("valid regex"));

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Remove the prompt when the model echoes it back at the start of its output
pub fn strip_prompt_echo<'a>(raw: &'a str, prompt: &str) -> &'a str {
    raw.strip_prefix(prompt).unwrap_or(raw).trim()
}

/// Tidy generated text.
///
/// - cut a trailing unfinished sentence back to the last `.`, `!` or `?`
/// - drop blank lines and separate the remaining lines with one blank line
/// - put a space between a sentence terminator and a following capital letter
pub fn post_process_story(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut text = text;
    if !text.ends_with(TERMINATORS)
        && let Some(last) = text.rfind(TERMINATORS)
        && last > 0
    {
        text = &text[..=last];
    }

    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    MISSING_SPACE_AFTER_TERMINATOR
        .replace_all(&joined, "$1 $2")
        .trim()
        .to_string()
}
