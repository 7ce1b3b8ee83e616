//! Cribb - Household Coordination Backend
//!
//! Roommates register, form groups, and accrue a score. The interesting part
//! is joining a group: the user's affiliation and the group's member list
//! are updated in one store transaction, so either both change or neither
//! does.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types (`User`, `Group`) and validation errors
//! - **`backend`** - Axum server, store adapters, directories, coordinator
//!
//! # Usage
//!
//! ```rust,no_run
//! use cribb::backend::server::{connect_store, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let store = connect_store(&config).await?;
//! let app = create_app(store, &config);
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
