//! Middleware Module
//!
//! Request processing that runs before handlers:
//!
//! - **`auth`** - `require_auth` / `optional_auth` and the `AuthUser` /
//!   `MaybeAuthUser` extractors
//! - **`admin`** - `require_admin`, composed after `require_auth`
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use todo_auth::backend::middleware::{require_admin, require_auth};
//! use todo_auth::backend::server::AppState;
//!
//! fn admin_routes(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/api/admin/stats", get(|| async { "ok" }))
//!         .route_layer(middleware::from_fn(require_admin))
//!         .route_layer(middleware::from_fn_with_state(state, require_auth))
//! }
//! ```

pub mod admin;

pub mod auth;

pub use admin::require_admin;
pub use auth::{bearer_token, optional_auth, require_auth, AuthUser, MaybeAuthUser};
