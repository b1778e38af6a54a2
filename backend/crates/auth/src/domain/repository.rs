//! Repository Traits
//!
//! The Identity Store. Implementations are in the infrastructure layer and
//! are the only writers of user records.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{UserId, email::Email, user_role::UserRole};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user under the next sequential id
    ///
    /// Fails with `AuthError::EmailTaken` when the (lowercased) email is
    /// already present. The check and the write are atomic.
    async fn insert(&self, user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Every user, in id order
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Set the role; `None` when the user no longer exists
    async fn update_role(&self, id: UserId, role: UserRole) -> AuthResult<Option<User>>;

    /// Remove a user; `false` when there was nothing to remove
    async fn delete(&self, id: UserId) -> AuthResult<bool>;
}
