/**
 * Admin Handlers
 *
 * Mounted behind `require_auth` + `require_admin`.
 *
 * - `GET /api/admin/stats` - global user and todo counters
 * - `GET /api/admin/users` - the 100 most recently created users
 * - `PATCH /api/admin/users/{id}` - change `role` and/or `isActive`
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::profile::USER_NOT_FOUND;
use crate::backend::auth::users::{count_users, list_recent, update_admin_fields};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::todos::db::count_all;
use crate::backend::validation::{admin_update_user_input, id_param};
use crate::shared::{AdminStats, ApiResponse, UserProfile};

pub const USER_LIST_LIMIT: i64 = 100;

pub async fn admin_stats(
    State(pool): State<SqlitePool>,
) -> Result<Json<ApiResponse<AdminStats>>, BackendError> {
    let (users_count, active_users) = count_users(&pool).await?;
    let (todos_count, completed_todos) = count_all(&pool).await?;

    Ok(Json(ApiResponse::ok(AdminStats::new(
        users_count,
        active_users,
        todos_count,
        completed_todos,
    ))))
}

pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, BackendError> {
    let users = list_recent(&pool, USER_LIST_LIMIT).await?;
    Ok(Json(ApiResponse::ok(
        users.iter().map(|user| user.to_profile()).collect(),
    )))
}

pub async fn update_user(
    State(pool): State<SqlitePool>,
    AuthUser(admin): AuthUser,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<UserProfile>>, BackendError> {
    let Path(id) = id?;
    let id = id_param(&id)?;
    let Json(body) = payload?;
    let update = admin_update_user_input(body)?;

    let user = update_admin_fields(&pool, id, update.role, update.is_active)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
    tracing::info!(
        "Admin {} updated user {}: role={}, active={}",
        admin.username,
        user.username,
        user.role,
        user.is_active
    );

    Ok(Json(ApiResponse::ok(user.to_profile())))
}
