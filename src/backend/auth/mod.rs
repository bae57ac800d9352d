//! Authentication Module
//!
//! User accounts, password hashing, JWT sessions and the auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - JWT token creation and validation
//! ├── service.rs      - register / login / authenticate
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost from `BCRYPT_COST`, default 12)
//! - Tokens are HS256 JWTs carrying only the user id, valid 7 days by default
//! - Every authenticated request re-reads the user, so disabling an account
//!   takes effect immediately
//! - Unknown users and wrong passwords return the same 401 message

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Registration, login and token resolution
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_profile, login, logout, register, update_profile, verify};
pub use users::User;
