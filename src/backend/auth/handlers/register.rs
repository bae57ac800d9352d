/**
 * Register Handler
 *
 * `POST /api/auth/register`
 *
 * # Registration Process
 *
 * 1. Validate username, email, password and optional names
 * 2. Reject an existing username or email (400)
 * 3. Hash the password and create the user
 * 4. Sign a token and stamp `last_login`
 * 5. Return 201 with `{ user, token }`
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use crate::backend::auth::service;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::validation::register_input;
use crate::shared::{ApiResponse, AuthPayload};

pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), BackendError> {
    let Json(body) = payload?;
    let request = register_input(body)?;
    tracing::info!("Registration request for: {}", request.username);

    let (user, token) = service::register(&app_state.db_pool, &app_state.auth, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok(AuthPayload {
                user: user.to_profile(),
                token,
            })
            .with_message("Registration successful"),
        ),
    ))
}
