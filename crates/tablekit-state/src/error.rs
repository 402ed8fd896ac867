//! Error types for table state persistence and configuration.

use std::io;

/// Errors that can occur when saving table state or reading configs.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The storage backend failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A config could not be decoded as YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A config failed validation.
    #[error("Invalid table config: {0}")]
    InvalidConfig(String),

    /// No preset with this id exists.
    #[error("Unknown preset '{0}'.")]
    UnknownPreset(String),
}

impl StateError {
    /// Create an invalid config error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for state operations.
pub type Result<T> = std::result::Result<T, StateError>;
