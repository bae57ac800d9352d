//! Client error types

use thiserror::Error;

use crate::shared::{ConfigError, FieldError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with `success: false`; `message` is shown as-is
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Field errors of a failed validation, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}
