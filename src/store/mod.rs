//! User record storage
//!
//! The auth core reaches storage only through the `UserStore` trait. `create`
//! is an atomic insert-if-absent: duplicate detection happens inside the store
//! (a uniqueness constraint in Postgres, the map entry in memory), not as a
//! separate existence check that could race with a concurrent signup.

use axum::async_trait;
use thiserror::Error;

use crate::models::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage collaborator owning the user table
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up exactly one user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, failing with `DuplicateEmail` if the email is taken
    async fn create(&self, user: User) -> Result<User, StoreError>;
}
