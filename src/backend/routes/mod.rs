//! Route Configuration Module
//!
//! - **`router`** - `create_router`: routes, fallback and HTTP layers
//! - **`api_routes`** - `/api/...` route groups with their access middleware
//! - **`legacy_routes`** - redirects from the old un-prefixed paths
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_auth::backend::routes::{create_router, HttpOptions};
//! use todo_auth::backend::server::{config::connect_in_memory, AppState, AuthSettings, Environment};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let pool = connect_in_memory().await?;
//! let state = AppState::new(pool, AuthSettings::new("secret", 7, 12), Environment::Development);
//! let router = create_router(state, &HttpOptions::default());
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint groups
pub mod api_routes;

/// Legacy path redirects
pub mod legacy_routes;

pub use router::{create_router, route_not_found, HttpOptions};
