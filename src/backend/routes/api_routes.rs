/**
 * API Routes
 *
 * Route groups for the JSON API. Each group is its own `Router` so the
 * access middleware can be attached with `route_layer` to exactly the
 * routes that need it.
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/health`
 * - `POST /api/auth/register`
 * - `POST /api/auth/login`
 *
 * ## Authenticated
 * - `GET|PUT /api/auth/profile`, `GET /api/auth/verify`, `POST /api/auth/logout`
 * - everything under `/api/todos`
 *
 * ## Admin
 * - `GET /api/admin/stats`, `GET /api/admin/users`, `PATCH /api/admin/users/{id}`
 */

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::backend::admin::{admin_stats, list_users, update_user};
use crate::backend::auth::{get_profile, login, logout, register, update_profile, verify};
use crate::backend::middleware::{require_admin, require_auth};
use crate::backend::server::state::AppState;
use crate::backend::todos::{
    create_todo, delete_completed, delete_todo, get_todo, list_todos, overdue_todos, todo_stats,
    toggle_todo, update_todo,
};

/// Liveness probe
pub async fn health(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": app_state.environment.as_str(),
    }))
}

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected = Router::new()
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(app_state, require_auth));

    public.merge(protected)
}

pub fn todo_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/todos", post(create_todo).get(list_todos))
        .route("/api/todos/stats", get(todo_stats))
        .route("/api/todos/overdue", get(overdue_todos))
        .route("/api/todos/completed/all", delete(delete_completed))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .route_layer(middleware::from_fn_with_state(app_state, require_auth))
}

pub fn admin_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(admin_stats))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", patch(update_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(app_state, require_auth))
}

/// Add every API route group to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        .merge(auth_routes(app_state.clone()))
        .merge(todo_routes(app_state.clone()))
        .merge(admin_routes(app_state))
}
