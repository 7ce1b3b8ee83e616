//! Groups Module
//!
//! Groups are created empty and gain members only through the join
//! coordinator, which updates the user's affiliation and the group's member
//! list inside one store transaction.
//!
//! # Module Structure
//!
//! ```text
//! groups/
//! ├── mod.rs        - Module exports and documentation
//! ├── directory.rs  - GroupDirectory: create, find, list members
//! ├── join.rs       - JoinCoordinator: the atomic join
//! └── handlers.rs   - /api/groups endpoints
//! ```

/// Group records
pub mod directory;

/// Atomic group join
pub mod join;

/// HTTP handlers
pub mod handlers;

pub use directory::{GroupDirectory, GroupDirectoryError};
pub use join::{JoinCoordinator, JoinError, Membership};
