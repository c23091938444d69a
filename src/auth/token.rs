//! Access token issuance and validation
//!
//! Stateless HS256 bearer tokens: validity is determined by signature and
//! expiry alone, never by a server-side lookup.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,
}

/// Claims embedded in an access token
///
/// Fixed schema: extra fields in a presented token are ignored rather than
/// trusted downstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Process-wide signing key, built once at startup from the configured secret.
///
/// Immutable after construction and safe to share across request tasks.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    // Key material must never reach logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Issue a signed access token for a verified identity
///
/// # Arguments
/// * `email` - Verified account email (becomes the `sub` claim)
/// * `key` - Process signing key
/// * `now` - Current time from the injected clock
/// * `ttl_seconds` - Token time-to-live in seconds
pub fn issue_access_token(
    email: &str,
    key: &SigningKey,
    now: DateTime<Utc>,
    ttl_seconds: i64,
) -> Result<String, TokenError> {
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &key.encoding)
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))
}

/// Verify and decode an access token
///
/// The signature is verified before any claim is deserialized; expiry is then
/// checked against `now` so callers control the clock.
///
/// # Returns
/// * `Ok(Claims)` if the signature verifies and the token has not expired
/// * `Err(TokenError)` otherwise
pub fn validate_access_token(
    token: &str,
    key: &SigningKey,
    now: DateTime<Utc>,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is enforced below against the injected clock, not the system one
    validation.validate_exp = false;

    let token_data =
        decode::<Claims>(token, &key.decoding, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

    let claims = token_data.claims;
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
