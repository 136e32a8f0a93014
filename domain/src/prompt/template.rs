//! Prompt templates for story generation

use crate::story::{AgeGroup, Genre, StoryLength, StoryParams};

/// Templates for assembling the story generation prompt
pub struct StoryPromptTemplate;

impl StoryPromptTemplate {
    /// Opening line that sets the model's role
    pub fn preamble() -> &'static str {
        "You are a professional children's story writer."
    }

    /// Writing rules for an age band
    pub fn age_instruction(age_group: AgeGroup) -> &'static str {
        match age_group {
            AgeGroup::Toddler => {
                r#"Write a story for very young children (ages 3-5).
RULES:
- Use very simple and short sentences
- Include repetitive words and rhythm
- Use colorful and fun words
- Each sentence should be understandable
- Use a positive and happy tone"#
            }
            AgeGroup::Child => {
                r#"Write a story for school-aged children (ages 6-10).
RULES:
- Use clear but rich vocabulary
- Teach simple moral lessons
- Stimulate the imagination
- Add adventure and excitement
- Be fun and engaging"#
            }
            AgeGroup::Teen => {
                r#"Write a story for older children (ages 11-15).
RULES:
- Use rich vocabulary
- Develop deeper characters
- Develop an interesting plot
- Teach values and lessons
- Be engaging"#
            }
        }
    }

    pub fn genre_instruction(genre: Genre) -> &'static str {
        match genre {
            Genre::Adventure => {
                "Write an adventure story filled with excitement, discovery, and courage."
            }
            Genre::Fantasy => {
                "Write a story featuring magic, enchantment, and fantastical creatures."
            }
            Genre::Friendship => "Write a story about friendship, cooperation, and love.",
            Genre::Educational => {
                "Write an educational and instructive yet very entertaining story."
            }
            Genre::Animal => "Write a story filled with cute animal characters.",
            Genre::Family => "Write a heartwarming story about family values and love.",
            Genre::Nature => "Write a story about nature, the environment, and animals.",
            Genre::Science => "Write an interesting story about science and exploration.",
            Genre::Mystery => "Write an exciting story about mystery and puzzle solving.",
            Genre::Humor => "Write a funny and entertaining story that will make you laugh.",
        }
    }

    pub fn length_instruction(length: StoryLength) -> &'static str {
        match length {
            StoryLength::Short => "Write a short story (approximately 200-300 words).",
            StoryLength::Medium => "Write a medium-length story (approximately 400-600 words).",
            StoryLength::Long => {
                "Write a long and detailed story (approximately 800-1000 words)."
            }
        }
    }

    /// Closing rules every story must follow
    pub fn closing_instructions() -> &'static str {
        r#"IMPORTANT:
1. Start the story with a catchy title
2. Write fluently and engagingly
3. Use child-friendly language
4. Be safe and educational
5. End with a happy or educational ending

Now write the story:"#
    }

    /// Assemble the full generation prompt
    pub fn build_story_prompt(params: &StoryParams) -> String {
        let mut prompt = format!(
            "{}\n\n{}\n\nGENRE: {}\n\nLENGTH: {}\n\nTOPIC: {}",
            Self::preamble(),
            Self::age_instruction(params.age_group()),
            Self::genre_instruction(params.genre()),
            Self::length_instruction(params.length()),
            params.topic()
        );

        if let Some(names) = params.characters().filter(|n| !n.is_empty()) {
            prompt.push_str(&format!(
                "\nCHARACTERS: Use the named characters {}.",
                names.join(", ")
            ));
        }

        prompt.push_str("\n\n");
        prompt.push_str(Self::closing_instructions());
        prompt
    }
}
