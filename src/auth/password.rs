//! Password hashing capability
//!
//! bcrypt owns salt generation and the constant-time digest comparison; the
//! rest of the crate only sees the `PasswordHasher` trait.

use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHash(String),
}

/// Capability for hashing and verifying account passwords
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Check a presented password against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError>;
}

/// bcrypt-backed hasher
#[derive(Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| HashError::HashFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError> {
        bcrypt::verify(plaintext, hash).map_err(|e| HashError::InvalidHash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn hash_then_verify_roundtrip() {
        let h = hasher();
        let stored = h.hash("secret123").unwrap();

        assert_ne!(stored, "secret123");
        assert!(h.verify("secret123", &stored).unwrap());
        assert!(!h.verify("wrong", &stored).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let h = hasher();
        let a = h.hash("secret123").unwrap();
        let b = h.hash("secret123").unwrap();

        // Fresh salt per hash
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let h = hasher();
        assert!(h.verify("secret123", "not-a-bcrypt-hash").is_err());
    }
}
