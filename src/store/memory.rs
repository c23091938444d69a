//! In-memory user store
//!
//! Used by the test suite and for running the service without a database.
//! Insert-if-absent is atomic under the map lock.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::async_trait;

use crate::models::User;

use super::{StoreError, UserStore};

/// `UserStore` over a mutex-guarded map keyed by email
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn test_user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$fakedigestfortestsonly".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryUserStore::new();
        store.create(test_user("alice@x.com")).await.unwrap();

        let found = store.find_by_email("alice@x.com").await.unwrap();
        assert_eq!(found.unwrap().username, "alice");

        let missing = store.find_by_email("bob@x.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_mutation() {
        let store = MemoryUserStore::new();
        let first = store.create(test_user("alice@x.com")).await.unwrap();

        let result = store.create(test_user("alice@x.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail)));

        // Existing record untouched
        let found = store.find_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }
}
