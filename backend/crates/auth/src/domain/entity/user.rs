//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// A persisted user, credential included
///
/// Never serialized; the outward shape is [`UserProfile`].
#[derive(Debug, Clone)]
pub struct User {
    /// Sequential id assigned by the store
    pub id: UserId,
    pub name: UserName,
    /// Unique, lowercased
    pub email: Email,
    pub password: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public projection without the credential
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

/// A user that has not been stored yet; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub role: UserRole,
}

impl NewUser {
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// What other users and other bounded contexts may see of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
