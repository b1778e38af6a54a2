//! Seed Owner Use Case
//!
//! Runs once per startup. Creates the Owner account when no user with the
//! owner email exists; otherwise leaves the existing record exactly as it is.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(UserId),
    AlreadyPresent(UserId),
}

pub struct SeedOwnerUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SeedOwnerUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self) -> AuthResult<SeedOutcome> {
        let seed = &self.config.owner_seed;
        let email = Email::new(seed.email.as_str())?;

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            tracing::info!(user_id = %existing.id, "Owner account already present");
            return Ok(SeedOutcome::AlreadyPresent(existing.id));
        }

        // Operator-provided credential; the registration policy does not apply
        let raw_password = RawPassword::presented(seed.password.clone());
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let new_owner = NewUser {
            name: UserName::new(&seed.name)?,
            email,
            password,
            role: UserRole::Owner,
        };

        match self.repo.insert(new_owner).await {
            Ok(owner) => {
                tracing::info!(user_id = %owner.id, email = %owner.email, "Owner account seeded");
                Ok(SeedOutcome::Created(owner.id))
            }
            // Another instance seeded between our lookup and insert
            Err(AuthError::EmailTaken) => {
                let email = Email::new(seed.email.as_str())?;
                let existing = self
                    .repo
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| AuthError::Internal("Owner vanished during seeding".into()))?;
                Ok(SeedOutcome::AlreadyPresent(existing.id))
            }
            Err(e) => Err(e),
        }
    }
}
