//! The story served when generation fails or its output is rejected

/// Fixed, pre-validated child-safe story
pub const FALLBACK_STORY: &str = "# Little Hero

Once upon a time, there lived a brave boy in a small town. Every day, he sought new adventures and played fun games with his friends.
One day, he found a little cat lost in the town park. The cat was very sad and scared. The boy decided to help the cat.
He searched all day for the cat's owner. He knocked on every door, asking everyone. Finally, he found a family who missed the cat very much.
The family was overjoyed and thanked the boy. The boy learned how beautiful it was to help.
From that day on, he always tried to help others. And so, he became the little hero.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{OutputLimits, validate_story_output};

    #[test]
    fn test_fallback_passes_output_validation() {
        assert!(validate_story_output(FALLBACK_STORY, &OutputLimits::default()).is_ok());
    }

    #[test]
    fn test_fallback_has_title() {
        assert!(FALLBACK_STORY.starts_with("# Little Hero"));
    }
}
