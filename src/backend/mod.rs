//! Backend Module
//!
//! Server-side code for the todo API: an Axum HTTP server over SQLite with
//! JWT bearer authentication. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - configuration, `AppState`, `create_app`
//! - **`routes`** - router assembly, HTTP layers, legacy redirects
//! - **`auth`** - user store, password hashing, tokens, auth handlers
//! - **`todos`** - todo queries and handlers
//! - **`admin`** - admin statistics and user management
//! - **`middleware`** - `require_auth`, `optional_auth`, `require_admin`
//! - **`validation`** - declarative request rules
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── server/       - Config, state, initialization
//! ├── routes/       - Route configuration
//! ├── auth/         - Users, sessions, auth handlers
//! ├── todos/        - Todo storage and handlers
//! ├── admin/        - Admin handlers
//! ├── middleware/   - Access control
//! ├── validation/   - Request validation
//! └── error/        - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Every error renders as the
//! standard `{ success: false, message, errors? }` envelope with the
//! matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Todo storage and handlers
pub mod todos;

/// Admin endpoints
pub mod admin;

/// Middleware for request processing
pub mod middleware;

/// Request validation
pub mod validation;

pub use error::BackendError;
pub use routes::{create_router, HttpOptions};
pub use server::{create_app, AppState, ServerConfig};
