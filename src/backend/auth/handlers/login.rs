/**
 * Login Handler
 *
 * `POST /api/auth/login`
 *
 * # Authentication Process
 *
 * 1. Look up the user by username or email
 * 2. Verify the password with bcrypt
 * 3. Refuse disabled accounts
 * 4. Sign a token, stamp `last_login`, return `{ user, token }`
 *
 * Unknown users and wrong passwords get the same 401 message.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::Value;

use crate::backend::auth::service;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::validation::login_input;
use crate::shared::{ApiResponse, AuthPayload};

pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthPayload>>, BackendError> {
    let Json(body) = payload?;
    let request = login_input(body)?;
    tracing::info!("Login request for: {}", request.username);

    let (user, token) = service::login(&app_state.db_pool, &app_state.auth, request).await?;

    Ok(Json(
        ApiResponse::ok(AuthPayload {
            user: user.to_profile(),
            token,
        })
        .with_message("Login successful"),
    ))
}
