//! Backend Module
//!
//! All server-side code for Cribb: an Axum HTTP API over a transactional
//! store for users, groups and the atomic group join.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup, shutdown
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - The `Store` port with PostgreSQL and in-memory adapters
//! - **`auth`** - Password hashing and registration
//! - **`users`** - User directory and user endpoints
//! - **`groups`** - Group directory, join coordinator, group endpoints
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── store/          - Persistence port and adapters
//! ├── auth/           - Registration and password hashing
//! ├── users/          - Users
//! ├── groups/         - Groups and joins
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Each layer has its own `thiserror` enum. Store errors are classified
//! once, at the store boundary; handlers convert component errors into
//! `BackendError` with `?`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Persistence
pub mod store;

/// Backend error types
pub mod error;

/// Registration and password hashing
pub mod auth;

/// User directory
pub mod users;

/// Groups and the join coordinator
pub mod groups;

pub use error::BackendError;
pub use server::create_app;
