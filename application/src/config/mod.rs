//! Application-level configuration.
//!
//! - [`GenerationParams`]: sampling, timeout and output bounds for story generation
//! - [`SessionConfig`]: session TTL and sweep period

pub mod generation_params;
pub mod session_config;

pub use generation_params::GenerationParams;
pub use session_config::SessionConfig;
