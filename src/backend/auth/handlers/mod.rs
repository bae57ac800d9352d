//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── register.rs - POST /api/auth/register
//! ├── login.rs    - POST /api/auth/login
//! ├── profile.rs  - GET/PUT /api/auth/profile
//! └── session.rs  - GET /api/auth/verify, POST /api/auth/logout
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user created → `{ user, token }`
//! 2. **Login**: username or email + password → credentials verified → `{ user, token }`
//! 3. **Authenticated calls**: `Authorization: Bearer <token>` → `require_auth`
//!    resolves the user → handler

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Profile read and update
pub mod profile;

/// Token check and logout
pub mod session;

pub use login::login;
pub use profile::{get_profile, update_profile};
pub use register::register;
pub use session::{logout, verify};
