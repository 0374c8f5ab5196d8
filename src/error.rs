//! Engine-level errors
//!
//! Per-row import problems are not errors (see `importer::SkipReason`), and
//! validation findings are report data. This enum covers configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value for '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

impl EngineError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            key,
            reason: reason.into(),
        }
    }
}
