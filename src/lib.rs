//! todo-auth
//!
//! A multi-user todo service with JWT authentication, plus a typed HTTP
//! client for it.
//!
//! # Module Structure
//!
//! - **`shared`** - wire types used by both sides: users, todos, the
//!   response envelope, client configuration
//! - **`backend`** - Axum server over SQLite (`ssr` feature)
//! - **`client`** - async `reqwest` client with token storage (`client` feature)
//!
//! # Usage
//!
//! ```rust,no_run
//! # #[cfg(feature = "ssr")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use todo_auth::backend::server::{create_app, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let (app, _state) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// HTTP client for the todo API
#[cfg(feature = "client")]
pub mod client;
