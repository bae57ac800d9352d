/**
 * Profile Handlers
 *
 * `GET /api/auth/profile` returns the caller with their todo counters;
 * `PUT /api/auth/profile` applies a partial update. Preference blocks are
 * merged into the stored preferences, so `{ "preferences": { "theme":
 * "dark" } }` leaves language and notifications alone.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::backend::auth::users::{self, get_user_by_email, ProfileChanges};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::todos::db::summary;
use crate::backend::validation::update_profile_input;
use crate::shared::{ApiResponse, ProfilePayload, UserPayload};

pub const USER_NOT_FOUND: &str = "User not found";

pub async fn get_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<ProfilePayload>>, BackendError> {
    let stats = summary(&pool, user.id).await?;

    Ok(Json(ApiResponse::ok(ProfilePayload {
        user: user.to_profile(),
        stats,
    })))
}

pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<UserPayload>>, BackendError> {
    let Json(body) = payload?;
    let request = update_profile_input(body)?;

    if let Some(email) = &request.email {
        if let Some(owner) = get_user_by_email(&pool, email).await? {
            if owner.id != user.id {
                return Err(BackendError::conflict("Email already in use"));
            }
        }
    }

    let changes = ProfileChanges {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        preferences: request
            .preferences
            .as_ref()
            .map(|patch| user.preferences.merge(patch)),
    };

    let updated = users::update_profile(&pool, user.id, &changes)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
    tracing::info!("Profile updated for {}", updated.username);

    Ok(Json(
        ApiResponse::ok(UserPayload {
            user: updated.to_profile(),
        })
        .with_message("Profile updated"),
    ))
}
