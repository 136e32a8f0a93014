//! REPL (Read-Eval-Print Loop) for the story conversation

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::{OutputFormatter, formatter_for};
use crate::progress::reporter::ProgressReporter;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use story_chat_application::{ChatReply, NoProgress, ProgressNotifier, StoryChatService};
use story_chat_domain::SessionId;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    New,
    Status,
    Sweep,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a slash command; `None` for ordinary chat input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = match line {
            "/help" | "/h" | "/?" => Self::Help,
            "/new" | "/reset" => Self::New,
            "/status" => Self::Status,
            "/sweep" => Self::Sweep,
            "/quit" | "/exit" | "/q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Interactive story REPL
pub struct ChatRepl {
    service: Arc<StoryChatService>,
    config: ReplConfig,
    formatter: Box<dyn OutputFormatter>,
    session_id: Option<SessionId>,
}

impl ChatRepl {
    pub fn new(service: Arc<StoryChatService>, config: ReplConfig) -> Self {
        let formatter = formatter_for(config.output);
        Self {
            service,
            config,
            formatter,
            session_id: None,
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Send one message through the full chat flow
    pub async fn send(&mut self, message: &str) -> ChatReply {
        let reporter;
        let progress: &dyn ProgressNotifier = if self.config.show_progress {
            reporter = ProgressReporter::new();
            &reporter
        } else {
            &NoProgress
        };

        let session = self.session_id.as_ref().map(SessionId::as_str);
        let reply = self.service.chat(session, message, progress).await;
        self.session_id = Some(reply.session_id.clone());
        reply
    }

    /// Send each message in order, printing every reply
    pub async fn run_once(&mut self, messages: &[String]) {
        for message in messages {
            let reply = self.send(message).await;
            println!("{}", self.formatter.format_reply(&reply));
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!("History disabled: {}", e),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("you".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome().await;

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    let reply = self.send(line).await;
                    println!("{}", self.formatter.format_reply(&reply));
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│               Story Chat                    │");
        println!("╰─────────────────────────────────────────────╯");
        println!();

        let model = self.service.model_name();
        if self.service.is_model_ready().await {
            println!("Model: {}", model);
        } else {
            println!(
                "Model: {} (not reachable; a ready-made story will be used)",
                model
            );
        }
        println!();
        Self::print_help();
        println!("Say hello to begin!");
        println!();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /new              - Start a new story from scratch");
        println!("  /status           - Show the current session");
        println!("  /sweep            - Remove expired sessions");
        println!("  /quit, /exit, /q  - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::New => {
                self.session_id = None;
                println!("Starting over. Say hello to begin!");
            }
            ReplCommand::Status => {
                let snapshot = self
                    .session_id
                    .as_ref()
                    .and_then(|id| self.service.session_snapshot(id));
                let ready = self.service.is_model_ready().await;
                println!(
                    "{}",
                    ConsoleFormatter::format_status(
                        snapshot.as_ref(),
                        &self.service.model_name(),
                        ready,
                        self.service.session_count()
                    )
                );
            }
            ReplCommand::Sweep => {
                let removed = self.service.sweep_expired();
                println!("Removed {} expired session(s)", removed);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use story_chat_application::{
        GenerationConfig, GenerationError, GenerationParams, SessionConfig, StoryGenerator,
    };
    use story_chat_domain::{CollectionPrompts, ConversationState};

    struct DownGenerator;

    #[async_trait]
    impl StoryGenerator for DownGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::ConnectionError("down".to_string()))
        }

        async fn is_ready(&self) -> bool {
            false
        }

        fn model_name(&self) -> &str {
            "down"
        }
    }

    fn repl() -> ChatRepl {
        let service = Arc::new(StoryChatService::new(
            Arc::new(DownGenerator),
            SessionConfig::default(),
            GenerationParams::default(),
        ));
        let config = ReplConfig {
            show_progress: false,
            history_file: None,
            ..ReplConfig::default()
        };
        ChatRepl::new(service, config)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse(" /new "), Some(ReplCommand::New));
        assert_eq!(
            ReplCommand::parse("/dance"),
            Some(ReplCommand::Unknown("/dance".to_string()))
        );
        assert_eq!(ReplCommand::parse("hello"), None);
    }

    #[tokio::test]
    async fn test_send_keeps_session() {
        let mut repl = repl();
        let first = repl.send("hi").await;
        assert_eq!(first.reply, CollectionPrompts::greeting());
        let second = repl.send("6-10").await;
        assert_eq!(second.session_id, first.session_id);
        assert_eq!(repl.session_id(), Some(&first.session_id));
    }

    #[tokio::test]
    async fn test_full_script_serves_fallback_when_backend_down() {
        let mut repl = repl();
        let script = [
            "hi",
            "6-10",
            "nature",
            "short",
            "A snail who wants to see the sea",
            "no",
        ];
        let mut last = None;
        for message in script {
            last = Some(repl.send(message).await);
        }
        let reply = last.unwrap();
        assert!(reply.complete);
        assert!(reply.story.unwrap().is_fallback());

        let id = repl.session_id().unwrap().clone();
        let session = repl.service.session_snapshot(&id).unwrap();
        assert_eq!(session.state(), ConversationState::Done);
    }

    #[tokio::test]
    async fn test_run_once_threads_one_session() {
        let mut repl = repl();
        repl.run_once(&["hi".to_string(), "6-10".to_string()]).await;
        let id = repl.session_id().unwrap().clone();
        let session = repl.service.session_snapshot(&id).unwrap();
        assert_eq!(session.state(), ConversationState::Genre);
        assert_eq!(repl.service.session_count(), 1);
    }

    #[tokio::test]
    async fn test_new_command_drops_session() {
        let mut repl = repl();
        repl.send("hi").await;
        assert!(!repl.handle_command(ReplCommand::New).await);
        assert!(repl.session_id().is_none());
        assert!(repl.handle_command(ReplCommand::Quit).await);
    }
}
