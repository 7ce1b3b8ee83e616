//! Authentication Module
//!
//! Credentials exist only at registration: the password is hashed with
//! bcrypt and stored, and nothing reads it back. There are no sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── password.rs  - bcrypt hashing and the opaque CredentialHash
//! └── handlers/    - POST /api/register
//! ```

/// Password hashing
pub mod password;

/// HTTP handlers
pub mod handlers;

pub use handlers::register;
pub use password::{hash_password, CredentialHash, PasswordError};
