/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * `AppState` is built once by `create_app` and cloned into every handler;
 * all fields are cheap to clone (the pool and `Arc`s are reference
 * counted).
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::server::config::{AuthSettings, Environment};

/// Central state container for the Axum application
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,

    /// Token signing secret, token lifetime and bcrypt cost
    pub auth: Arc<AuthSettings>,

    /// Reported by the health probe
    pub environment: Environment,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, auth: AuthSettings, environment: Environment) -> Self {
        Self {
            db_pool,
            auth: Arc::new(auth),
            environment,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<AuthSettings> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
