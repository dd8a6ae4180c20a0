//! In-Memory User Repository
//!
//! HashMap-backed repository for use-case tests and local experiments.
//! Semantics mirror the Postgres adapter: email lookup is an exact
//! match against the stored (lowercase) address, username lookup is an
//! exact match.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;

/// In-memory implementation of the user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, User>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.lock().insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .values()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.lock().insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }
}
