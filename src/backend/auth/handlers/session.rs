/**
 * Session Handlers
 *
 * `GET /api/auth/verify` echoes the user behind a valid token.
 * `POST /api/auth/logout` only acknowledges: tokens are stateless and the
 * client discards its copy.
 */

use axum::response::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::{ApiResponse, UserPayload};

pub async fn verify(AuthUser(user): AuthUser) -> Json<ApiResponse<UserPayload>> {
    Json(
        ApiResponse::ok(UserPayload {
            user: user.to_profile(),
        })
        .with_message("Token valid"),
    )
}

pub async fn logout(AuthUser(user): AuthUser) -> Json<ApiResponse<()>> {
    tracing::info!("User logged out: {}", user.username);
    Json(ApiResponse::message("Logout successful"))
}
