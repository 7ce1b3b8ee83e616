//! Common test utilities and helpers
//!
//! - `app` - a `TestServer` over the full router and an in-memory store
//! - `assertions` - checks on the JSON error envelope and user payloads
//! - `logs` - captures tracing output for assertions on logging
//! - `database` - live PostgreSQL fixture, used when `DATABASE_URL` is set

pub mod app;
pub mod database;
pub mod logs;

pub use app::*;
pub use assertions::*;
pub use logs::CapturedLogs;
