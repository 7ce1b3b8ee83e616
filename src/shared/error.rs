//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and any
//! client of the API. These errors represent request-level failures that are
//! detected before any store access happens.
//!
//! # Error Categories
//!
//! - `ValidationError` - A required field is missing, empty or malformed
//!
//! # Usage
//!
//! ```rust
//! use cribb::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::required("username");
//! assert_eq!(error.to_string(), "Validation error in field 'username': username is required");
//! ```
use thiserror::Error;

/// Shared error types that can occur on either side of the API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a required field that was missing or empty
    pub fn required(field: &str) -> Self {
        Self::validation(field, format!("{field} is required"))
    }

    /// Human-readable message without the field prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}

/// Reject an empty value for a required field.
///
/// Values are not trimmed: `" "` is accepted, `""` is not.
pub fn require(field: &str, value: &str) -> Result<(), SharedError> {
    if value.is_empty() {
        return Err(SharedError::required(field));
    }
    Ok(())
}
