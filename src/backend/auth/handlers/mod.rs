//! Authentication HTTP Handlers
//!
//! - **`register`** - `POST /api/register`
//! - **`types`** - Request and response bodies

/// Registration handler
pub mod register;

/// Request/response types
pub mod types;

pub use register::register;
