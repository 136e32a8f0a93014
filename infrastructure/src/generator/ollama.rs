//! Ollama HTTP generator
//!
//! Uses the non-streaming `/api/generate` endpoint. Ollama has no
//! n-gram blocking option, so `no_repeat_ngram_size` is not forwarded;
//! `repeat_penalty` is the closest control it offers.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use story_chat_application::{GenerationConfig, GenerationError, StoryGenerator};
use tracing::{debug, info};

/// Connect timeout for the local server; the overall request is bounded by
/// the generation timeout upstream.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, PartialEq, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    repeat_penalty: f32,
}

impl From<&GenerationConfig> for GenerateOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            num_predict: config.max_length,
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            repeat_penalty: config.repetition_penalty,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Story generator backed by a local Ollama server
pub struct OllamaStoryGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaStoryGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::ConnectionError(e.to_string()))?;

        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let model = model.into();
        info!("Ollama generator: {} at {}", model, endpoint);

        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn map_send_error(e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout
        } else if e.is_connect() {
            GenerationError::ConnectionError(e.to_string())
        } else {
            GenerationError::RequestFailed(e.to_string())
        }
    }
}

/// Whether an installed tag such as `llama3.2:latest` serves `model`
fn tag_matches(tag: &str, model: &str) -> bool {
    if tag == model {
        return true;
    }
    !model.contains(':') && tag.split(':').next() == Some(model)
}

#[async_trait]
impl StoryGenerator for OllamaStoryGenerator {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: config.into(),
        };
        debug!("POST {} ({} prompt bytes)", self.url("api/generate"), prompt.len());

        let response = self
            .client
            .post(self.url("api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GenerationError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }

    async fn is_ready(&self) -> bool {
        let response = match self.client.get(self.url("api/tags")).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("Ollama tags returned HTTP {}", r.status());
                return false;
            }
            Err(e) => {
                debug!("Ollama not reachable: {}", e);
                return false;
            }
        };

        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.iter().any(|m| tag_matches(&m.name, &self.model)),
            Err(e) => {
                debug!("Unreadable Ollama tags response: {}", e);
                false
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
