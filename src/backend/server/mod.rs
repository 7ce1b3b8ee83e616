//! Server Module
//!
//! Configuration, state, startup and shutdown for the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ServerConfig from environment variables
//! ├── state.rs        - AppState and FromRef implementations
//! ├── init.rs         - Store bring-up and app creation
//! └── shutdown.rs     - SIGTERM/SIGINT handling
//! ```
//!
//! # Lifecycle
//!
//! connect → ping → migrate → serve → (signal) drain → close store

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

/// Graceful shutdown
pub mod shutdown;

pub use config::{ConfigError, ServerConfig};
pub use init::{connect_store, create_app};
pub use shutdown::shutdown_signal;
pub use state::AppState;
