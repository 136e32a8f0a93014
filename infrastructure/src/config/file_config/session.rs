//! Session lifetime configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use story_chat_application::SessionConfig;

/// Raw session configuration from TOML
///
/// ```toml
/// [session]
/// ttl_hours = 24
/// sweep_interval_minutes = 30   # 0 disables the background sweep
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub ttl_hours: u64,
    pub sweep_interval_minutes: u64,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            sweep_interval_minutes: 30,
        }
    }
}

impl FileSessionConfig {
    pub fn to_session_config(&self) -> SessionConfig {
        let sweep = (self.sweep_interval_minutes > 0)
            .then(|| Duration::from_secs(self.sweep_interval_minutes.saturating_mul(60)));
        SessionConfig::default()
            .with_ttl(Duration::from_secs(self.ttl_hours.saturating_mul(3600)))
            .with_sweep_interval(sweep)
    }
}
