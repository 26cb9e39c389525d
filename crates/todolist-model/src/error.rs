//! Error types for record parsing.

use thiserror::Error;

/// A specialized Result type for model conversions.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur when converting raw values into model types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A numeric priority outside 1-3.
    #[error("invalid priority: {value} (expected 1-3)")]
    InvalidPriority {
        /// The rejected value.
        value: String,
    },

    /// A numeric status outside 0-3.
    #[error("invalid status: {value} (expected 0-3)")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },
}

impl ModelError {
    /// Creates an invalid priority error.
    pub fn invalid_priority(value: impl Into<String>) -> Self {
        ModelError::InvalidPriority {
            value: value.into(),
        }
    }

    /// Creates an invalid status error.
    pub fn invalid_status(value: impl Into<String>) -> Self {
        ModelError::InvalidStatus {
            value: value.into(),
        }
    }
}
