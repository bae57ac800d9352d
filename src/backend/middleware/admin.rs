//! Admin gate
//!
//! Layered after `require_auth`; only callers whose role is `admin` get
//! through.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::TOKEN_REQUIRED;

pub const ADMIN_REQUIRED: &str = "Admin access required";

pub async fn require_admin(request: Request, next: Next) -> Result<Response, BackendError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| BackendError::unauthorized(TOKEN_REQUIRED))?;

    if !user.is_admin() {
        tracing::warn!("Admin route refused for {}", user.username);
        return Err(BackendError::forbidden(ADMIN_REQUIRED));
    }

    Ok(next.run(request).await)
}
