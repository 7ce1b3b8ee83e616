/**
 * Store Errors
 *
 * Every failure coming out of the store is classified here, once, at the
 * boundary nearest the driver call. Nothing above this module inspects a
 * `sqlx::Error` directly.
 *
 * # Classification
 *
 * - Unique constraint violation (SQLSTATE 23505) -> `DuplicateKey`
 * - Pool acquisition deadline expired -> `Timeout`
 * - Pool closed, socket or TLS failure -> `Unavailable`
 * - Anything else (decode failure, bad SQL, migration failure) -> `Backend`
 */

use thiserror::Error;

/// Errors returned by a `Store` or `StoreTransaction`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected an insert
    #[error("duplicate key violates unique constraint `{constraint}`")]
    DuplicateKey {
        /// Name of the violated constraint, e.g. `users_username_key`
        constraint: String,
    },

    /// The operation did not complete before its deadline
    #[error("store operation timed out")]
    Timeout,

    /// The store could not be reached
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Driver-level detail, for logs only
        message: String,
    },

    /// Any other store failure
    #[error("store error: {message}")]
    Backend {
        /// Driver-level detail, for logs only
        message: String,
    },
}

impl StoreError {
    pub fn duplicate_key(constraint: impl Into<String>) -> Self {
        Self::DuplicateKey {
            constraint: constraint.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// True when the error names the given unique constraint
    pub fn is_duplicate_of(&self, name: &str) -> bool {
        matches!(self, Self::DuplicateKey { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::duplicate_key(db_err.constraint().unwrap_or("unknown"))
            }
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                Self::unavailable(err.to_string())
            }
            _ => Self::backend(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::backend(format!("migration failed: {err}"))
    }
}
