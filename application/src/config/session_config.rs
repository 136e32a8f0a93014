//! Session lifetime configuration.

use std::time::Duration;

/// How long sessions live and how often expired ones are swept.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions older than this are evicted.
    pub ttl: Duration,
    /// Period of the background sweep (`None` disables it).
    pub sweep_interval: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Some(Duration::from_secs(30 * 60)),
        }
    }
}

impl SessionConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Option<Duration>) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// TTL as a `chrono` duration for timestamp arithmetic
    pub fn ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_day() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_chrono(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let config = SessionConfig::default().with_ttl(Duration::MAX);
        assert_eq!(config.ttl_chrono(), chrono::Duration::MAX);
    }
}
