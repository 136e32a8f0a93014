//! Story generator adapters.
//!
//! - [`OllamaStoryGenerator`]: a local Ollama server over HTTP (`ollama` feature)
//! - [`OfflineStoryGenerator`]: no backend; every request falls back

mod offline;
#[cfg(feature = "ollama")]
mod ollama;

pub use offline::OfflineStoryGenerator;
#[cfg(feature = "ollama")]
pub use ollama::OllamaStoryGenerator;
