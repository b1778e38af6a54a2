//! Register Use Case
//!
//! Creates a `User`-role account and signs the caller in. Registration never
//! grants a higher role; the Owner comes only from seeding.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{IssuedSession, SessionIssuer};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<IssuedSession> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(input.email)?;

        // Fail fast before paying for a hash; insert re-checks atomically
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = self
            .repo
            .insert(NewUser {
                name,
                email,
                password,
                role: UserRole::User,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        SessionIssuer::new(self.config.clone()).issue(&user)
    }
}
