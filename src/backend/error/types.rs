/**
 * Backend Error Types
 *
 * One enum for every failure a handler can report. Client-facing variants
 * carry the message shown to the user verbatim; server-side variants wrap
 * the underlying error, which is logged and never shown outside debug
 * builds.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::shared::{FieldError, SharedError};

/// Public message for every 500 response
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Public message for every validation failure
pub const INVALID_DATA_MESSAGE: &str = "Invalid data";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request failed one or more validation rules
    #[error("Validation failed: {errors:?}")]
    Validation {
        /// Per-field failures
        errors: Vec<FieldError>,
    },

    /// Unique username or email already taken
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but not allowed
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Resource absent or owned by someone else
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Store failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Token could not be signed
    #[error("Token error: {0}")]
    Token(TokenError),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Wire value that does not fit its domain type
    #[error(transparent)]
    Shared(#[from] SharedError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Shared(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Database(_)
            | Self::Token(_)
            | Self::Hashing(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation { .. } => INVALID_DATA_MESSAGE.to_string(),
            Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message } => message.clone(),
            Self::Shared(SharedError::ValidationError { message, .. }) => message.clone(),
            _ => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    /// Field errors carried by validation failures
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation { errors } => Some(errors.clone()),
            Self::Shared(SharedError::ValidationError { field, message }) => Some(vec![FieldError::new(
                field.clone(),
                message.clone(),
                crate::shared::FieldLocation::Body,
            )]),
            _ => None,
        }
    }
}
