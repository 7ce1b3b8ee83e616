/**
 * Password Hashing
 *
 * Passwords are hashed with bcrypt (salted, deliberately slow) before they
 * reach the store. Hashing runs on the blocking thread pool so a burst of
 * registrations does not stall the async workers.
 *
 * The resulting `CredentialHash` cannot be serialized and prints as
 * `CredentialHash(..)` in `Debug` output, so it can never leak through a
 * response body or a log line.
 */

use std::fmt;

use thiserror::Error;

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Errors produced while hashing a password
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(String),
}

/// A bcrypt hash of a user's password
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a value that is already a bcrypt hash
    pub fn from_hashed(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(..)")
    }
}

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<CredentialHash, PasswordError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
        .map(CredentialHash)
        .map_err(PasswordError::from)
}
