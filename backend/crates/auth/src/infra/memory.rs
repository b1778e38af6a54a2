//! In-Memory Repository Implementation
//!
//! Used when no database is configured, and by tests. State lives behind a
//! single `RwLock`, so the uniqueness check and the insert in
//! [`InMemoryUserRepository::insert`] happen under one write guard.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Default for UserTable {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: UserId::new(UserId::FIRST),
        }
    }
}

/// In-memory user store; clones share the same table
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        let id = table.next_id;
        table.next_id = id.next();

        let user = user.into_user(id, Utc::now());
        table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| &u.email == email).cloned())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> AuthResult<Option<User>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|user| {
            user.set_role(role);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
