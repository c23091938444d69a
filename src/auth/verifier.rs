//! Credential verification
//!
//! Checks a presented email/password pair against stored records. The caller
//! (the auth gateway) is responsible for collapsing the distinct failure
//! variants into a uniform client-facing error.

use std::sync::Arc;

use thiserror::Error;

use crate::store::{StoreError, UserStore};

use super::password::{HashError, PasswordHasher};

/// bcrypt digest of an unknowable password, verified on the missing-user path
/// so a lookup miss costs the same as a hash mismatch.
const DUMMY_HASH: &str = "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// Verification errors
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("No user registered for that email")]
    NoSuchUser,

    #[error("Password mismatch")]
    BadPassword,

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Hasher failure: {0}")]
    Hasher(String),
}

impl From<StoreError> for VerifyError {
    fn from(e: StoreError) -> Self {
        match e {
            // A duplicate cannot arise from a read; treat it as a storage fault
            StoreError::DuplicateEmail => VerifyError::Storage(e.to_string()),
            StoreError::Unavailable(msg) => VerifyError::Storage(msg),
        }
    }
}

impl From<HashError> for VerifyError {
    fn from(e: HashError) -> Self {
        VerifyError::Hasher(e.to_string())
    }
}

/// Identity claim produced by a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
}

/// Verifies presented credentials against the user store
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Check an email/password pair; no side effects
    pub async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifiedIdentity, VerifyError> {
        let user = self.store.find_by_email(email).await?;

        let Some(user) = user else {
            // Burn a comparison anyway so the miss is not observably faster
            let _ = self.hasher.verify(password, DUMMY_HASH);
            return Err(VerifyError::NoSuchUser);
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(VerifyError::BadPassword);
        }

        Ok(VerifiedIdentity {
            email: user.email,
        })
    }
}
