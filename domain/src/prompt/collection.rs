//! Replies used while collecting story slots

/// Prompts shown to the user as the dialogue advances
pub struct CollectionPrompts;

impl CollectionPrompts {
    pub fn greeting() -> &'static str {
        r#"Hello! I'm your story assistant!

I can write a special story for you. First, I'll ask you a few questions.

How old are you?
- 3-5 years
- 6-10 years
- 11-15 years"#
    }

    pub fn genre() -> &'static str {
        r#"Great! What kind of story would you like?

- Adventure
- Fantasy
- Friendship
- Educational
- Animal stories
- Family
- Nature
- Science
- Mystery
- Comedy"#
    }

    pub fn length() -> &'static str {
        r#"Perfect! How long should the story be?

- Short - 2-3 minutes
- Medium - 5-7 minutes
- Long - 10+ minutes"#
    }

    pub fn topic() -> &'static str {
        r#"Great! Now for the most important part:

What should the story be about? Tell me about it!"#
    }

    pub fn characters() -> &'static str {
        r#"Great plot!

Should the story include special character names?
If so, write their names (separated by commas), otherwise, say 'no'."#
    }

    pub fn generating() -> &'static str {
        r#"I've got all the information!

Now I'm writing a special story for you..."#
    }

    pub fn invalid_age() -> &'static str {
        "Please select a valid age group: 3-5, 6-10, or 11-15"
    }

    pub fn invalid_genre() -> &'static str {
        "Please select a valid genre: adventure, fantasy, friendship, educational, animal, family, nature, science, mystery or humor"
    }

    pub fn invalid_length() -> &'static str {
        "Please select a valid length: short, medium, or long"
    }

    pub fn unsuitable_topic(reason: &str) -> String {
        format!(
            "The topic is not suitable: {}. Please write a child-friendly topic.",
            reason
        )
    }

    pub fn unsuitable_characters(reason: &str) -> String {
        format!("Character names are not appropriate: {}", reason)
    }

    pub fn characters_reprompt() -> &'static str {
        "Write character names separated by commas or say 'no'."
    }

    pub fn still_generating() -> &'static str {
        "I'm still writing your story. Please wait a moment!"
    }

    pub fn done_reprompt() -> &'static str {
        "Write 'new story' for a new story!"
    }

    pub fn start_over() -> &'static str {
        "Something went wrong. Let's start over!"
    }
}
