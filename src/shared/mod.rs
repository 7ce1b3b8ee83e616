//! Shared Module
//!
//! This module contains the data structures exchanged over the HTTP API.
//! They are plain serde types with no dependency on the store or the server,
//! so any Rust client of the API can reuse them.

/// User record
pub mod user;

/// Group record
pub mod group;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use user::{User, Standing, DEFAULT_SCORE};
pub use group::Group;
pub use error::SharedError;
