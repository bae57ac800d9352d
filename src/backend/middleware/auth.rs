/**
 * Authentication Middleware
 *
 * Extracts `Authorization: Bearer <token>`, resolves it to a stored user
 * through the auth service and attaches that `User` to the request
 * extensions. Handlers read it back with the `AuthUser` / `MaybeAuthUser`
 * extractors.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::service::authenticate;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const TOKEN_REQUIRED: &str = "Access token required";

/// Bearer token from the `Authorization` header, if well formed
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject the request with 401 unless it carries a valid token for an
/// active user
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthorized(TOKEN_REQUIRED)
    })?;

    let user = authenticate(&app_state.db_pool, &app_state.auth, token)
        .await
        .inspect_err(|e| tracing::warn!("Rejected token: {}", e))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Attach the user when a valid token is present, otherwise continue
/// anonymously
pub async fn optional_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match authenticate(&app_state.db_pool, &app_state.auth, token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!("Ignoring invalid optional token: {}", e),
        }
    }
    next.run(request).await
}

/// The authenticated caller, as attached by `require_auth`
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("User not found in request extensions");
                BackendError::unauthorized(TOKEN_REQUIRED)
            })
    }
}

/// The caller when `optional_auth` resolved one
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<User>().cloned()))
    }
}
