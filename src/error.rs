//! Error types
//!
//! Only configuration loading can fail. The per-frame components (clock,
//! random sources, gesture classifier) degrade to documented fallbacks instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
