//! Per-machine runtime configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of transition records a machine retains.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not a valid configuration document
    #[error("Invalid machine configuration: {0}")]
    Parse(String),
}

/// Runtime options for a [`StateMachine`](crate::engine::StateMachine).
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use tinyfsm::engine::MachineConfig;
///
/// let config = MachineConfig::from_json_str(r#"{ "history_limit": 4 }"#).unwrap();
/// assert_eq!(config.history_limit, Some(4));
/// assert!(config.trace_transitions);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// How many transitions to keep in the history. `None` keeps all of
    /// them, `Some(0)` disables the history.
    pub history_limit: Option<usize>,

    /// Emit a `debug` log record for every committed transition.
    pub trace_transitions: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            trace_transitions: true,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn trace_transitions(mut self, enabled: bool) -> Self {
        self.trace_transitions = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_bounded_history() {
        let config = MachineConfig::default();
        assert_eq!(config.history_limit, Some(DEFAULT_HISTORY_LIMIT));
        assert!(config.trace_transitions);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = MachineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn null_limit_means_unbounded() {
        let config =
            MachineConfig::from_json_str(r#"{ "history_limit": null, "trace_transitions": false }"#)
                .unwrap();
        assert_eq!(config.history_limit, None);
        assert!(!config.trace_transitions);
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result = MachineConfig::from_json_str(r#"{ "history_limit": "many" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn fluent_setters_override_defaults() {
        let config = MachineConfig::default()
            .history_limit(None)
            .trace_transitions(false);
        assert_eq!(config.history_limit, None);
        assert!(!config.trace_transitions);
    }
}
