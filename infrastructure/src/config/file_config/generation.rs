//! Generation backend configuration from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};
use story_chat_application::GenerationConfig;

/// Generator backends the binary knows how to build
pub const PROVIDERS: &[&str] = &["ollama", "offline"];

/// Raw generation configuration from TOML
///
/// ```toml
/// [generation]
/// provider = "ollama"
/// endpoint = "http://localhost:11434"
/// model = "llama3.2"
/// temperature = 0.7
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Backend: "ollama" or "offline" (always serves the fallback story)
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    /// Upper bound on generated tokens
    pub max_length: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
    pub timeout_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let sampling = GenerationConfig::default();
        Self {
            provider: "ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            max_length: sampling.max_length,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            top_k: sampling.top_k,
            repetition_penalty: sampling.repetition_penalty,
            no_repeat_ngram_size: sampling.no_repeat_ngram_size,
            timeout_secs: 120,
        }
    }
}

impl FileGenerationConfig {
    /// Sampling settings handed to the generator
    pub fn sampling(&self) -> GenerationConfig {
        GenerationConfig {
            max_length: self.max_length,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            repetition_penalty: self.repetition_penalty,
            no_repeat_ngram_size: self.no_repeat_ngram_size,
        }
    }
}
