//! Generation parameters: story orchestration control.
//!
//! [`GenerationParams`] groups what [`GenerateStoryUseCase`](crate::use_cases::generate_story::GenerateStoryUseCase)
//! needs: sampling settings passed to the generator, how long to wait for it,
//! and the length bounds of an acceptable story.

use crate::ports::story_generator::GenerationConfig;
use std::time::Duration;
use story_chat_domain::OutputLimits;

#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Sampling settings forwarded to the generator.
    pub sampling: GenerationConfig,
    /// Give up on the generator after this long and serve the fallback.
    pub timeout: Duration,
    /// Length bounds for validated output.
    pub limits: OutputLimits,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            sampling: GenerationConfig::default(),
            timeout: Duration::from_secs(120),
            limits: OutputLimits::default(),
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_sampling(mut self, sampling: GenerationConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_limits(mut self, limits: OutputLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.timeout, Duration::from_secs(120));
        assert_eq!(params.limits.min_chars, 100);
        assert_eq!(params.limits.max_chars, 2000);
        assert_eq!(params.sampling.top_k, 50);
    }

    #[test]
    fn test_builder_chain() {
        let params = GenerationParams::default()
            .with_timeout(Duration::from_secs(5))
            .with_limits(OutputLimits {
                min_chars: 10,
                max_chars: 50,
            });
        assert_eq!(params.timeout, Duration::from_secs(5));
        assert_eq!(params.limits.max_chars, 50);
    }
}
