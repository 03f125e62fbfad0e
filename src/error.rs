//! Error types for the Rune API contract layer

use thiserror::Error;

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Contract error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid {shape}: field {field} {reason}")]
    Validation {
        shape: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a validation error for a field of a shape
    pub fn validation(shape: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        ApiError::Validation {
            shape,
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error reports an invalid constructed value
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    /// Whether this error reports a payload that could not be mapped to a shape
    pub fn is_serialization(&self) -> bool {
        matches!(self, ApiError::Serialization(_))
    }
}

/// Fail with a validation error when a required string field is empty
pub(crate) fn require(shape: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ApiError::validation(shape, field, "is required"));
    }
    Ok(())
}
