//! Users Module
//!
//! - **`directory`** - `UserDirectory`, registration and lookups
//! - **`handlers`** - `/api/users` endpoints

/// User records
pub mod directory;

/// HTTP handlers
pub mod handlers;

pub use directory::{Registration, UserDirectory, UserDirectoryError};
