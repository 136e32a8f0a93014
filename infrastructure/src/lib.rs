//! Infrastructure layer for story-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generator;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoadError, ConfigLoader, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileSessionConfig, FileStoryConfig,
};
pub use generator::OfflineStoryGenerator;
#[cfg(feature = "ollama")]
pub use generator::OllamaStoryGenerator;
pub use logging::JsonlConversationLogger;
