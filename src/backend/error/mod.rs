//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and the
//! translations into it from every component error.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status mapping
//! ├── conversion.rs - From impls and IntoResponse
//! └── extract.rs    - JSON extractor with BackendError rejections
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and let `?` do the mapping.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// Request extractors that reject with `BackendError`
pub mod extract;

// Re-export commonly used types
pub use types::BackendError;
pub use extract::ApiJson;
