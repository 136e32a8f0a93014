//! Configuration loading for story-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `STORY_CHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./story-chat.toml` or `./.story-chat.toml`
//! 4. Global: `~/.config/story-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGenerationConfig, FileLoggingConfig, FileSessionConfig, FileStoryConfig,
    PROVIDERS,
};
pub use loader::{ConfigLoadError, ConfigLoader};
