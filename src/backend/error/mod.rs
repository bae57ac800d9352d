//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are returned from HTTP handlers and rendered as the JSON
//! response envelope.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` definition and constructors
//! - **`conversion`** - `IntoResponse` plus conversions from store, token and
//!   extractor errors
//!
//! # Status Mapping
//!
//! | Variant | Status |
//! |---|---|
//! | `Validation`, `Conflict` | 400 |
//! | `Unauthorized` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Database`, `Token`, `Hashing`, `Internal` | 500 |
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_auth::backend::error::BackendError;
//!
//! fn find() -> Result<(), BackendError> {
//!     Err(BackendError::not_found("Todo not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
