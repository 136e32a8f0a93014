//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use crate::cli::commands::OutputFormat;
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show a spinner while generating
    pub show_progress: bool,
    /// Path to history file (`None` keeps history in memory only)
    pub history_file: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: dirs::data_dir().map(|d| d.join("story-chat").join("history.txt")),
            output: OutputFormat::Text,
        }
    }
}
