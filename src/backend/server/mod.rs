//! Server Module
//!
//! Server initialization, configuration and shared state.
//!
//! # Architecture
//!
//! - **`config`** - Environment configuration and database pool setup
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - `create_app`: pool, migrations, admin bootstrap, router
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env()`
//! 2. **Database**: open the pool and run migrations
//! 3. **Bootstrap**: promote `ADMIN_BOOTSTRAP_USERNAME` if configured
//! 4. **Router Creation**: routes, middleware and layers

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

/// Application state management
pub mod state;

pub use config::{AuthSettings, Environment, ServerConfig};
pub use init::create_app;
pub use state::AppState;
