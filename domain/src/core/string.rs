//! String utilities for the domain layer.

/// Length of a string in Unicode scalar values.
///
/// All length limits in the validation rules are expressed in characters,
/// not bytes, so "çocuk" counts as 5.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shorten text for log lines, appending `...` when cut.
///
/// Counts characters, so multi-byte input is never split mid-character.
pub fn preview(s: &str, max_chars: usize) -> String {
    if char_len(s) <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
