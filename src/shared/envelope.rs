//! Response Envelope
//!
//! Every API response, success or failure, is wrapped in the same JSON
//! envelope so clients can branch on `success` and show `message` as-is:
//!
//! ```json
//! { "success": false, "message": "Invalid data", "errors": [{ "field": "title", "message": "...", "location": "body" }] }
//! ```

use serde::{Deserialize, Serialize};

/// Where a rejected value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Body,
    Query,
    Params,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the offending field (`preferences.theme`, `tags[2]`)
    pub field: String,
    /// Human-readable reason
    pub message: String,
    pub location: FieldLocation,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, location: FieldLocation) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            location,
        }
    }
}

/// The `{ success, message?, data?, errors? }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
        }
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Successful response with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: None,
        }
    }

    /// Failure response
    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}
