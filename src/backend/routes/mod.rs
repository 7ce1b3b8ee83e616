//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health check, fallback
//! └── api_routes.rs   - /api endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use cribb::backend::routes::create_router;
//! use cribb::backend::server::state::AppState;
//! use cribb::backend::store::MemoryStore;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), 4, Duration::from_secs(30));
//! let router = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
