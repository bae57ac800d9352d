/**
 * Session Management and JWT Tokens
 *
 * Stateless HS256 bearer tokens. The only claim that matters is `sub`,
 * the user id; the current user is always re-read from the store when a
 * token is presented, so role or active-flag changes apply immediately.
 */

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::server::config::AuthSettings;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("failed to sign token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Create a JWT token for a user, valid for `settings.token_ttl`
pub fn create_token(user_id: Uuid, settings: &AuthSettings) -> Result<String, TokenError> {
    create_token_at(user_id, settings, Utc::now())
}

/// Same as [`create_token`] with an explicit issue time
pub fn create_token_at(
    user_id: Uuid,
    settings: &AuthSettings,
    issued_at: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = Claims {
        sub: user_id.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + settings.token_ttl).timestamp(),
    };
    let key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &key).map_err(TokenError::Encoding)
}

/// Verify signature and expiry, returning the decoded claims
pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(settings.jwt_secret.as_bytes());

    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}
