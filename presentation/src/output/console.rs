//! Console output formatter for replies and stories

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use story_chat_application::ChatReply;
use story_chat_domain::{GeneratedStory, Session, StoryOrigin};

/// Formats chat output for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one reply, followed by the story when the turn produced one
    pub fn format(reply: &ChatReply) -> String {
        let mut output = format!("{} {}\n", "story>".cyan().bold(), reply.reply);
        if let Some(story) = &reply.story {
            output.push('\n');
            output.push_str(&Self::format_story(story));
        }
        output
    }

    /// Format a finished story with its title as the header
    pub fn format_story(story: &GeneratedStory) -> String {
        let (title, body) = split_title(&story.text);

        let mut output = String::new();
        output.push_str(&Self::header(title.unwrap_or("Your Story")));
        output.push_str("\n\n");
        output.push_str(&Self::indent(body, "  "));
        output.push('\n');

        if let StoryOrigin::Fallback { reason } = &story.origin {
            output.push_str(&format!(
                "\n{}\n",
                format!("(a ready-made story was used: {})", reason).dimmed()
            ));
        }

        output.push_str(&Self::footer());
        output.push_str(&format!(
            "{}\n",
            "Write 'new story' for another one.".dimmed()
        ));
        output
    }

    /// Format the `/status` view of a session
    pub fn format_status(
        session: Option<&Session>,
        model: &str,
        model_ready: bool,
        live_sessions: usize,
    ) -> String {
        let mut output = Self::section_header("Status");

        let readiness = if model_ready {
            "ready".green()
        } else {
            "not ready".red()
        };
        output.push_str(&format!("{} {} ({})\n", "Model:".cyan().bold(), model, readiness));
        output.push_str(&format!(
            "{} {}\n",
            "Live sessions:".cyan().bold(),
            live_sessions
        ));

        let Some(session) = session else {
            output.push_str(&format!("{}\n", "No active session".dimmed()));
            return output;
        };

        output.push_str(&format!("{} {}\n", "Session:".cyan().bold(), session.id()));
        output.push_str(&format!("{} {}\n", "State:".cyan().bold(), session.state()));

        let params = session.params();
        let slots = [
            ("age", params.age_group().map(|a| a.to_string())),
            ("genre", params.genre().map(|g| g.to_string())),
            ("length", params.length().map(|l| l.to_string())),
            ("topic", params.topic().map(str::to_string)),
        ];
        for (name, value) in slots {
            match value {
                Some(v) => output.push_str(&format!("  {:<8}{}\n", name, v)),
                None => output.push_str(&format!("  {:<8}{}\n", name, "-".dimmed())),
            }
        }
        output.push_str(&format!(
            "  {:<8}{}\n",
            "missing",
            params
                .missing()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_reply(&self, reply: &ChatReply) -> String {
        Self::format(reply)
    }
}

/// Split a leading `# Title` line off a story
fn split_title(text: &str) -> (Option<&str>, &str) {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("# ") {
        match rest.split_once('\n') {
            Some((title, body)) => (Some(title.trim()), body.trim_start()),
            None => (Some(rest.trim()), ""),
        }
    } else {
        (None, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use story_chat_domain::{FALLBACK_STORY, SessionId};

    #[test]
    fn test_split_title() {
        assert_eq!(
            split_title("# Little Hero\n\nOnce upon a time."),
            (Some("Little Hero"), "Once upon a time.")
        );
        assert_eq!(split_title("No title here."), (None, "No title here."));
    }

    #[test]
    fn test_fallback_story_shows_title_and_note() {
        let story = GeneratedStory::fallback("timeout");
        let output = ConsoleFormatter::format_story(&story);
        assert!(output.contains("Little Hero"));
        assert!(output.contains("ready-made story was used: timeout"));
        assert!(!output.contains("# Little Hero"));
        assert!(FALLBACK_STORY.starts_with("# Little Hero"));
    }

    #[test]
    fn test_reply_without_story() {
        let reply = ChatReply {
            session_id: SessionId::from("s"),
            reply: "How old are you?".to_string(),
            params: None,
            story: None,
            complete: false,
        };
        let output = ConsoleFormatter.format_reply(&reply);
        assert!(output.contains("How old are you?"));
        assert!(!output.contains("===="));
    }

    #[test]
    fn test_status_lists_missing_slots() {
        let session = Session::new("abc", Utc::now());
        let output = ConsoleFormatter::format_status(Some(&session), "llama3.2", false, 1);
        assert!(output.contains("abc"));
        assert!(output.contains("greeting"));
        assert!(output.contains("age_group"));
        assert!(output.contains("not ready"));
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(ConsoleFormatter::indent("a\n\nb", "  "), "  a\n\n  b");
    }
}
