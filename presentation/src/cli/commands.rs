//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored text for a terminal
    Text,
    /// One JSON object per reply
    Json,
}

/// CLI arguments for story-chat
#[derive(Parser, Debug)]
#[command(name = "story-chat")]
#[command(author, version, about = "Conversational children's story generator")]
#[command(long_about = r#"
story-chat asks a few questions (age, genre, length, topic, characters) and
then writes a children's story with a local language model.

Configuration files are loaded from (in priority order):
1. STORY_CHAT_* environment variables (e.g. STORY_CHAT_GENERATION__MODEL)
2. --config <path>          Explicit config file
3. ./story-chat.toml        Project-level config
4. ~/.config/story-chat/config.toml   Global config

Example:
  story-chat
  story-chat -m hi -m 6-10 -m adventure -m short -m "A fox who finds a lost kite" -m no
"#)]
pub struct Cli {
    /// Send these messages in order instead of starting the REPL (repeatable)
    #[arg(short, long, value_name = "TEXT")]
    pub message: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
