//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use serde_json::json;
use story_chat_application::ChatReply;

/// Trait for rendering one chat reply
pub trait OutputFormatter: Send + Sync {
    fn format_reply(&self, reply: &ChatReply) -> String;
}

/// One compact JSON object per reply, for scripting
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_reply(&self, reply: &ChatReply) -> String {
        json!({
            "session_id": reply.session_id.as_str(),
            "reply": reply.reply,
            "complete": reply.complete,
            "params": reply.params,
            "story": reply.story,
        })
        .to_string()
    }
}

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
