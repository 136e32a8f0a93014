//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config
//! structs once validated.

mod generation;
mod logging;
mod session;
mod story;

pub use generation::{FileGenerationConfig, PROVIDERS};
pub use logging::FileLoggingConfig;
pub use session::FileSessionConfig;
pub use story::FileStoryConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use story_chat_application::GenerationParams;
use story_chat_domain::{ConfigIssue, ConfigIssueCode};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session lifetime
    pub session: FileSessionConfig,
    /// Generation backend and sampling
    pub generation: FileGenerationConfig,
    /// Accepted story length
    pub story: FileStoryConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let generation = &self.generation;

        if generation.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "generation.model".to_string(),
                },
                "generation.model cannot be empty",
            ));
        }

        if !PROVIDERS.contains(&generation.provider.to_lowercase().as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: "generation.provider".to_string(),
                    value: generation.provider.clone(),
                    valid_values: PROVIDERS.iter().map(|p| p.to_string()).collect(),
                },
                format!("generation.provider: unknown value '{}'", generation.provider),
            ));
        }

        if !(0.0..=2.0).contains(&generation.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "generation.temperature".to_string(),
                    value: f64::from(generation.temperature),
                },
                format!(
                    "generation.temperature must be between 0 and 2 (got {})",
                    generation.temperature
                ),
            ));
        }

        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "generation.top_p".to_string(),
                    value: f64::from(generation.top_p),
                },
                format!("generation.top_p must be in (0, 1] (got {})", generation.top_p),
            ));
        }

        if generation.max_length == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "generation.max_length".to_string(),
                    value: 0.0,
                },
                "generation.max_length cannot be 0",
            ));
        }

        if generation.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "generation.timeout_secs".to_string(),
                    value: 0.0,
                },
                "generation.timeout_secs is 0; every request will time out and serve the fallback story",
            ));
        }

        if self.story.min_length >= self.story.max_length {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvertedBounds {
                    min_field: "story.min_length".to_string(),
                    max_field: "story.max_length".to_string(),
                },
                format!(
                    "story.min_length ({}) must be below story.max_length ({})",
                    self.story.min_length, self.story.max_length
                ),
            ));
        }

        if self.session.ttl_hours == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "session.ttl_hours".to_string(),
                    value: 0.0,
                },
                "session.ttl_hours cannot be 0",
            ));
        }

        issues
    }

    /// Generation settings for the story use case
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_sampling(self.generation.sampling())
            .with_timeout(Duration::from_secs(self.generation.timeout_secs))
            .with_limits(self.story.to_limits())
    }
}
