//! Store Module
//!
//! This module defines the port through which the directories and the join
//! coordinator reach the database, plus the two adapters that implement it.
//!
//! # Architecture
//!
//! - **`Store`** - Non-transactional reads and inserts used by the directories
//! - **`StoreTransaction`** - A session-scoped unit of work; either every
//!   write made through it becomes visible on `commit`, or none does
//! - **`postgres`** - `PgStore`, the production adapter over `sqlx::PgPool`
//! - **`memory`** - `MemoryStore`, an in-process adapter with the same
//!   transactional guarantees, used by tests and local runs
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - Port traits and record types
//! ├── error.rs     - StoreError and driver error classification
//! ├── postgres.rs  - PostgreSQL adapter
//! └── memory.rs    - In-memory adapter
//! ```
//!
//! # Transactions
//!
//! Dropping a `StoreTransaction` without calling `commit` discards every write
//! made through it. Callers that abandon a transaction (for example because a
//! deadline expired) therefore never leave a partial update behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::password::CredentialHash;
use crate::shared::{Group, User};

/// Error types
pub mod error;

/// PostgreSQL adapter
pub mod postgres;

/// In-memory adapter
pub mod memory;

pub use error::StoreError;
pub use memory::{Fault, MemoryStore};
pub use postgres::PgStore;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Name of the unique constraint on `users.username`
pub const USERS_USERNAME_KEY: &str = "users_username_key";
/// Name of the unique constraint on `users.phone_number`
pub const USERS_PHONE_NUMBER_KEY: &str = "users_phone_number_key";
/// Name of the unique constraint on `groups.name`
pub const GROUPS_NAME_KEY: &str = "groups_name_key";

/// A user ready to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: CredentialHash,
    pub display_name: String,
    pub phone_number: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// A group ready to be inserted, with no members
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Identity projection of a group
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GroupRef {
    pub id: Uuid,
    pub name: String,
}

/// Identity projection of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRef {
    pub id: Uuid,
}

/// Persistence operations the directories need.
///
/// Object-safe and async-friendly via `async_trait`, so the application state
/// can hold an `Arc<dyn Store>` regardless of the adapter.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user. Fails with `DuplicateKey` on username or phone clash.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// Load a user by username.
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// All users in insertion order.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// All users, highest score first, ties by username.
    async fn list_users_by_score(&self) -> StoreResult<Vec<User>>;

    /// Users whose `group_id` is the given group.
    async fn list_users_in_group(&self, group_id: Uuid) -> StoreResult<Vec<User>>;

    /// Insert a group. Fails with `DuplicateKey` on name clash.
    async fn insert_group(&self, group: NewGroup) -> StoreResult<Group>;

    /// Load a group by name.
    async fn find_group_by_name(&self, name: &str) -> StoreResult<Option<Group>>;

    /// Start a transaction.
    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>>;

    /// Verify the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Release every connection held by the store.
    async fn close(&self);
}

/// Operations available inside a transaction.
///
/// The update methods return the number of records matched, mirroring the
/// matched count of the underlying update statement.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Look up a group by name, projecting only its identity.
    async fn find_group_ref(&mut self, name: &str) -> StoreResult<Option<GroupRef>>;

    /// Look up a user by username, projecting only its id.
    async fn find_user_ref(&mut self, username: &str) -> StoreResult<Option<UserRef>>;

    /// Point the user at `group` and refresh its `updated_at`.
    async fn assign_user_group(
        &mut self,
        user_id: Uuid,
        group: &GroupRef,
        at: DateTime<Utc>,
    ) -> StoreResult<u64>;

    /// Add `user_id` to the group's member set and refresh its `updated_at`.
    /// Adding an existing member still matches the group.
    async fn add_group_member(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> StoreResult<u64>;

    /// Make every write visible atomically.
    async fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}
