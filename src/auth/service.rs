//! Authentication gateway
//!
//! Composes the credential verifier, token issuer and token validator behind
//! the three operations the HTTP layer consumes: signup, signin and admit.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{TokenResponse, User};
use crate::store::{StoreError, UserStore};

use super::clock::Clock;
use super::password::{HashError, PasswordHasher};
use super::token::{issue_access_token, validate_access_token, SigningKey, TokenError};
use super::verifier::{CredentialVerifier, VerifiedIdentity, VerifyError};

/// Expected scheme prefix of the `Authorization` header
const BEARER_PREFIX: &str = "Bearer ";

/// Auth gateway errors
///
/// The variants stay distinguishable here; the HTTP error mapping collapses
/// credential and token failures into uniform client-facing messages.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    AlreadyExists,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal auth failure: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::AlreadyExists,
            StoreError::Unavailable(msg) => AuthError::StorageUnavailable(msg),
        }
    }
}

impl From<VerifyError> for AuthError {
    fn from(e: VerifyError) -> Self {
        match e {
            // Indistinguishable to callers: no account-enumeration signal
            VerifyError::NoSuchUser | VerifyError::BadPassword => AuthError::InvalidCredentials,
            VerifyError::Storage(msg) => AuthError::StorageUnavailable(msg),
            VerifyError::Hasher(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::Expired,
            TokenError::EncodingFailed(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<HashError> for AuthError {
    fn from(e: HashError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

/// Authentication service
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    verifier: CredentialVerifier,
    signing_key: SigningKey,
    access_token_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        signing_key: SigningKey,
        access_token_ttl_seconds: i64,
    ) -> Self {
        let verifier = CredentialVerifier::new(store.clone(), hasher.clone());
        Self {
            store,
            hasher,
            clock,
            verifier,
            signing_key,
            access_token_ttl_seconds,
        }
    }

    /// Register a new account with a freshly hashed password
    ///
    /// Duplicate detection is the store's insert-if-absent contract, so two
    /// concurrent signups for the same email cannot both succeed.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let password_hash = self.hasher.hash(password)?;
        let now = self.clock.now();

        let user = self
            .store
            .create(User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Verify credentials and issue an access token
    pub async fn signin(&self, email: &str, password: &str) -> Result<TokenResponse, AuthError> {
        let identity = self.verifier.verify(email, password).await?;

        let access_token = issue_access_token(
            &identity.email,
            &self.signing_key,
            self.clock.now(),
            self.access_token_ttl_seconds,
        )?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl_seconds,
        })
    }

    /// Validate the raw `Authorization` header of a protected request
    ///
    /// Returns the embedded identity on success; any failure is terminal for
    /// the request and the caller must reject before reaching protected logic.
    pub fn admit(&self, authorization: Option<&str>) -> Result<VerifiedIdentity, AuthError> {
        let header = authorization.ok_or(AuthError::MalformedToken)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MalformedToken)?;

        let claims = validate_access_token(token, &self.signing_key, self.clock.now())?;

        Ok(VerifiedIdentity { email: claims.sub })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::auth::clock::ManualClock;
    use crate::auth::password::BcryptHasher;
    use crate::store::MemoryUserStore;

    use super::*;

    fn test_service() -> (AuthService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = AuthService::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(BcryptHasher::new(4)),
            clock.clone(),
            SigningKey::from_secret("service-test-signing-secret-01234567"),
            3600,
        );
        (service, clock)
    }

    #[tokio::test]
    async fn signup_signin_admit_roundtrip() {
        let (service, _) = test_service();

        let user = service
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();
        assert_eq!(user.email, "alice@x.com");

        let tokens = service.signin("alice@x.com", "secret123").await.unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);

        let header = format!("Bearer {}", tokens.access_token);
        let identity = service.admit(Some(&header)).unwrap();
        assert_eq!(identity.email, "alice@x.com");
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let (service, _) = test_service();

        service
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();
        let result = service.signup("alice2", "alice@x.com", "other-pass").await;
        assert!(matches!(result, Err(AuthError::AlreadyExists)));

        // Original credentials still sign in
        assert!(service.signin("alice@x.com", "secret123").await.is_ok());
        assert!(matches!(
            service.signin("alice@x.com", "other-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn signin_failures_are_indistinguishable() {
        let (service, _) = test_service();

        service
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let wrong_password = service.signin("alice@x.com", "wrong").await.unwrap_err();
        let unknown_email = service.signin("bob@x.com", "secret123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn admit_rejects_expired_tokens() {
        let (service, clock) = test_service();

        service
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();
        let tokens = service.signin("alice@x.com", "secret123").await.unwrap();
        let header = format!("Bearer {}", tokens.access_token);

        assert!(service.admit(Some(&header)).is_ok());

        clock.advance(Duration::seconds(3601));
        assert!(matches!(
            service.admit(Some(&header)),
            Err(AuthError::Expired)
        ));
    }

    #[tokio::test]
    async fn admit_rejects_malformed_input() {
        let (service, _) = test_service();

        assert!(matches!(
            service.admit(None),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(
            service.admit(Some("Bearer garbage")),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(
            service.admit(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedToken)
        ));
    }

    #[tokio::test]
    async fn admit_rejects_tampered_tokens() {
        let (service, _) = test_service();

        service
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();
        let tokens = service.signin("alice@x.com", "secret123").await.unwrap();

        // 'A' <-> 'Q' keeps the final base64url character canonical
        let mut tampered = tokens.access_token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'Q' } else { 'A' });

        let header = format!("Bearer {}", tampered);
        assert!(matches!(
            service.admit(Some(&header)),
            Err(AuthError::InvalidSignature)
        ));
    }
}
