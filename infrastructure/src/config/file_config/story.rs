//! Story output bounds from TOML (`[story]` section)

use serde::{Deserialize, Serialize};
use story_chat_domain::OutputLimits;

/// Accepted length of a generated story, in characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoryConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for FileStoryConfig {
    fn default() -> Self {
        let limits = OutputLimits::default();
        Self {
            min_length: limits.min_chars,
            max_length: limits.max_chars,
        }
    }
}

impl FileStoryConfig {
    pub fn to_limits(&self) -> OutputLimits {
        OutputLimits {
            min_chars: self.min_length,
            max_chars: self.max_length,
        }
    }
}
