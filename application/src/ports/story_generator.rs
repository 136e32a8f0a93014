//! Story generator port
//!
//! Defines the interface to the text-generation backend. Model loading,
//! tokenization and sampling all happen behind this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while generating text
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Sampling settings handed to the generator unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on generated tokens
    pub max_length: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_length: 512,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.2,
            no_repeat_ngram_size: 3,
        }
    }
}

/// Text-generation capability
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate a continuation of `prompt`.
    ///
    /// The output may or may not repeat the prompt at its start.
    async fn generate(&self, prompt: &str, config: &GenerationConfig)
    -> Result<String, GenerationError>;

    /// Whether the backend and its model can serve requests right now
    async fn is_ready(&self) -> bool;

    /// Name of the model behind this generator
    fn model_name(&self) -> &str;
}
