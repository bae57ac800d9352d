//! Authentication Service
//!
//! Registration, login and bearer-token resolution on top of the user
//! store, the bcrypt helpers and the JWT session functions. Handlers and
//! the access middleware call these; none of them touch HTTP types.

use sqlx::SqlitePool;

use crate::backend::auth::sessions::{create_token, verify_token};
use crate::backend::auth::users::{
    create_user, find_by_username_or_email, get_user_by_id, touch_last_login, NewUser, User,
};
use crate::backend::error::BackendError;
use crate::backend::server::config::AuthSettings;
use crate::shared::{LoginRequest, RegisterRequest};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const ACCOUNT_DISABLED: &str = "Account disabled";
pub const USER_NOT_FOUND_OR_INACTIVE: &str = "User not found or inactive";

/// Create an account and sign the caller in
pub async fn register(
    pool: &SqlitePool,
    settings: &AuthSettings,
    request: RegisterRequest,
) -> Result<(User, String), BackendError> {
    if let Some(existing) = find_by_username_or_email(pool, &request.username, &request.email).await? {
        let message = if existing.username == request.username {
            "Username already taken"
        } else {
            "Email already in use"
        };
        tracing::warn!("Registration rejected for {}: {}", request.username, message);
        return Err(BackendError::conflict(message));
    }

    let new_user = NewUser::new(
        request.username,
        &request.email,
        &request.password,
        request.first_name,
        request.last_name,
        settings.bcrypt_cost,
    )?;
    let user = create_user(pool, &new_user).await?;
    let token = create_token(user.id, settings)?;
    let user = touch_last_login(pool, user.id).await?;

    tracing::info!("User registered: {} ({})", user.username, user.id);
    Ok((user, token))
}

/// Check credentials (`username` may be an email) and issue a token
pub async fn login(
    pool: &SqlitePool,
    settings: &AuthSettings,
    request: LoginRequest,
) -> Result<(User, String), BackendError> {
    let user = find_by_username_or_email(pool, &request.username, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, unknown user: {}", request.username);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !user.verify_password(&request.password)? {
        tracing::warn!("Login failed, wrong password for: {}", user.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        tracing::warn!("Login refused, account disabled: {}", user.username);
        return Err(BackendError::unauthorized(ACCOUNT_DISABLED));
    }

    let token = create_token(user.id, settings)?;
    let user = touch_last_login(pool, user.id).await?;

    tracing::info!("User logged in: {} ({})", user.username, user.id);
    Ok((user, token))
}

/// Resolve a bearer token to an existing, active user
pub async fn authenticate(
    pool: &SqlitePool,
    settings: &AuthSettings,
    token: &str,
) -> Result<User, BackendError> {
    let claims = verify_token(token, settings)?;
    let user_id = claims.user_id()?;

    match get_user_by_id(pool, user_id).await? {
        Some(user) if user.is_active => Ok(user),
        _ => Err(BackendError::unauthorized(USER_NOT_FOUND_OR_INACTIVE)),
    }
}
