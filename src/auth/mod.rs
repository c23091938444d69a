//! Authentication core for credgate
//!
//! Credential-based token issuance and verification:
//! - Credential verification against stored password hashes
//! - Signed, expiring access tokens (HS256)
//! - Gateway orchestration of signup, signin and protected-request admission

pub mod clock;
mod password;
mod service;
mod token;
mod verifier;

pub use clock::{Clock, ManualClock, SystemClock};
pub use password::{BcryptHasher, PasswordHasher};
pub use service::{AuthError, AuthService};
pub use token::{issue_access_token, validate_access_token, Claims, SigningKey, TokenError};
pub use verifier::{CredentialVerifier, VerifiedIdentity};
