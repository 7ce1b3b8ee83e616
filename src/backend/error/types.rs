/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 * Component errors (directory, coordinator, store) are translated into it
 * in `conversion.rs`; handlers never inspect store errors themselves.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `HandlerError` - the request could not be decoded (malformed JSON, bad
 *   query string); carries its own status code
 * - `ValidationError` - a required field is missing or empty
 * - `Conflict` - a uniqueness constraint rejected a create
 * - `NotFound` - a looked-up user or group does not exist
 *
 * ## Server Errors
 *
 * - `InconsistentState` - a record found earlier in a transaction vanished
 *   before it could be updated; reported as not-found
 * - `Internal` - store unreachable, timeout, decode failure or anything
 *   unclassified; the detail is logged, the client sees a generic message
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message returned to clients for every internal error
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use cribb::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Group not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request decoding error
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing or empty required field
    #[error(transparent)]
    ValidationError(#[from] SharedError),

    /// Uniqueness conflict on create
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Entity lookup failed
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// A record vanished between lookup and update
    #[error("Inconsistent state: {message}")]
    InconsistentState {
        /// Human-readable error message
        message: String,
    },

    /// Unclassified server-side failure
    #[error("Internal error: {detail}")]
    Internal {
        /// Log-only detail, never sent to the client
        detail: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `ValidationError` - 400 Bad Request
    /// - `Conflict` - 409 Conflict
    /// - `NotFound` - 404 Not Found
    /// - `InconsistentState` - 404 Not Found
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } | Self::InconsistentState { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::InconsistentState { message } => message.clone(),
            Self::ValidationError(err) => err.detail().to_string(),
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
