/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus the conversions that let handlers
 * use `?` on store, token and extractor errors.
 *
 * # Response Format
 *
 * ```json
 * { "success": false, "message": "Todo not found" }
 * ```
 *
 * Server errors add an `error` field with the underlying cause in debug
 * builds only.
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::auth::sessions::TokenError;
use crate::backend::error::types::BackendError;
use crate::shared::{ApiResponse, FieldError, FieldLocation};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = ApiResponse::failure(self.message(), self.field_errors());

        let mut body = serde_json::to_value(&envelope)
            .unwrap_or_else(|_| json!({ "success": false, "message": envelope.message }));

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            if cfg!(debug_assertions) {
                body["error"] = json!(self.to_string());
            }
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return BackendError::conflict(unique_violation_message(db_err.message()));
            }
        }
        BackendError::Database(err)
    }
}

/// SQLite reports `UNIQUE constraint failed: users.email`
fn unique_violation_message(raw: &str) -> &'static str {
    if raw.contains("users.username") {
        "Username already taken"
    } else if raw.contains("users.email") {
        "Email already in use"
    } else {
        "Resource already exists"
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => BackendError::unauthorized("Token expired"),
            TokenError::Invalid => BackendError::unauthorized("Invalid token"),
            other => BackendError::Token(other),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation(vec![FieldError::new(
            "body",
            rejection.body_text(),
            FieldLocation::Body,
        )])
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        BackendError::validation(vec![FieldError::new(
            "id",
            rejection.body_text(),
            FieldLocation::Params,
        )])
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::validation(vec![FieldError::new(
            "query",
            rejection.body_text(),
            FieldLocation::Query,
        )])
    }
}
