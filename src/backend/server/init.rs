/**
 * Server Initialization
 *
 * Builds the application from a loaded `ServerConfig`:
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Promote `ADMIN_BOOTSTRAP_USERNAME` to admin, if configured
 * 3. Create the `AppState` and the router
 *
 * A database failure aborts startup. A bootstrap username that does not
 * exist yet is only logged, so the admin can register and restart.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::auth::users::promote_to_admin;
use crate::backend::routes::{create_router, HttpOptions};
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// The returned `AppState` shares the pool with the router, so the caller
/// can close it after the server stops.
pub async fn create_app(config: &ServerConfig) -> Result<(Router<()>, AppState), sqlx::Error> {
    tracing::info!("Initializing todo-auth backend ({})", config.environment);

    let db_pool = load_database(&config.database_url, config.database_max_connections).await?;

    if let Some(username) = &config.admin_bootstrap_username {
        bootstrap_admin(&db_pool, username).await?;
    }

    let app_state = AppState::new(db_pool, config.auth.clone(), config.environment);
    let options = HttpOptions {
        cors_origins: config.cors_origins.clone(),
        static_dir: config.static_dir.clone(),
    };
    let app = create_router(app_state.clone(), &options);

    tracing::info!("Router configured");
    Ok((app, app_state))
}

async fn bootstrap_admin(pool: &SqlitePool, username: &str) -> Result<(), sqlx::Error> {
    if promote_to_admin(pool, username).await? {
        tracing::info!("Granted admin role to {}", username);
    } else {
        tracing::warn!("ADMIN_BOOTSTRAP_USERNAME {} does not match any user", username);
    }
    Ok(())
}
