//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables that do not change transition semantics.
///
/// Missing fields fall back to their defaults when deserializing, so
/// `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use statecraft::engine::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "history_capacity": 16 }"#).unwrap();
/// assert_eq!(config.history_capacity, 16);
/// assert!(!config.warn_on_unmatched);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of fired transitions retained in the engine history; 0 disables it.
    pub history_capacity: usize,

    /// Log unmatched events at `warn` instead of `debug`.
    pub warn_on_unmatched: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: 64,
            warn_on_unmatched: false,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
