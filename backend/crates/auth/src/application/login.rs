//! Login Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{IssuedSession, SessionIssuer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
///
/// An unknown email, a malformed email and a wrong password all produce the
/// same `InvalidCredentials` error.
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<IssuedSession> {
        let password = RawPassword::presented(input.password);

        let Ok(email) = Email::new(input.email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&password, self.config.pepper()) {
            tracing::warn!(user_id = %user.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        SessionIssuer::new(self.config.clone()).issue(&user)
    }
}
