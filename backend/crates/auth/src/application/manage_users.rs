//! Manage Users Use Case
//!
//! Owner-only user administration: list, promote, demote, delete.
//!
//! Every mutation runs the same three steps:
//! 1. actor-level policy check (no lookup yet, so a denied caller learns
//!    nothing about the target)
//! 2. target lookup (`UserNotFound`)
//! 3. policy check against the target's role (owner immutability)

use std::sync::Arc;

use crate::domain::entity::{actor::Actor, user::UserProfile};
use crate::domain::policy::{self, Operation};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct ManageUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ManageUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All users except the actor
    pub async fn list(&self, actor: &Actor) -> AuthResult<Vec<UserProfile>> {
        policy::authorize(actor.role, None, Operation::ViewAll).into_result()?;
        let users = self.repo.list().await?;
        Ok(policy::visible_to(actor, users.iter().map(|u| u.profile()))?)
    }

    pub async fn promote(&self, actor: &Actor, target: UserId) -> AuthResult<UserProfile> {
        self.change_role(actor, target, Operation::Promote, UserRole::Admin)
            .await
    }

    pub async fn demote(&self, actor: &Actor, target: UserId) -> AuthResult<UserProfile> {
        self.change_role(actor, target, Operation::Demote, UserRole::User)
            .await
    }

    pub async fn delete(&self, actor: &Actor, target: UserId) -> AuthResult<()> {
        self.check_target(actor, target, Operation::Delete).await?;

        // A concurrent delete already did the work
        if !self.repo.delete(target).await? {
            tracing::debug!(target_id = %target, "User already deleted");
        }

        tracing::info!(actor_id = %actor.id, target_id = %target, "User deleted");
        Ok(())
    }

    async fn change_role(
        &self,
        actor: &Actor,
        target: UserId,
        operation: Operation,
        role: UserRole,
    ) -> AuthResult<UserProfile> {
        self.check_target(actor, target, operation).await?;

        let updated = self
            .repo
            .update_role(target, role)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            actor_id = %actor.id,
            target_id = %target,
            role = %role,
            "User role changed"
        );

        Ok(updated.profile())
    }

    async fn check_target(&self, actor: &Actor, target: UserId, operation: Operation) -> AuthResult<()> {
        policy::authorize(actor.role, None, operation).into_result()?;

        let user = self
            .repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        policy::authorize(actor.role, Some(user.role), operation).into_result()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::application::seed_owner::{SeedOutcome, SeedOwnerUseCase};
    use crate::domain::policy::Denial;
    use crate::infra::memory::InMemoryUserRepository;

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        use_case: ManageUsersUseCase<InMemoryUserRepository>,
        owner: Actor,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        let SeedOutcome::Created(owner_id) = SeedOwnerUseCase::new(repo.clone(), config)
            .execute()
            .await
            .unwrap()
        else {
            panic!("fresh store must create the owner");
        };
        Fixture {
            use_case: ManageUsersUseCase::new(repo.clone()),
            repo,
            owner: Actor::new(owner_id, UserRole::Owner),
        }
    }

    async fn register(repo: &Arc<InMemoryUserRepository>, name: &str, email: &str) -> UserId {
        RegisterUseCase::new(repo.clone(), Arc::new(AuthConfig::with_random_secret()))
            .execute(RegisterInput {
                name: name.into(),
                email: email.into(),
                password: "secret1".into(),
            })
            .await
            .unwrap()
            .claims
            .sub
    }

    #[tokio::test]
    async fn test_ann_lifecycle() {
        let f = fixture().await;
        let ann = register(&f.repo, "Ann", "ann@x.com").await;

        let admin_id = register(&f.repo, "Bob", "bob@x.com").await;
        f.use_case.promote(&f.owner, admin_id).await.unwrap();
        let admin = Actor::new(admin_id, UserRole::Admin);

        let denied = f.use_case.promote(&admin, ann).await;
        assert!(matches!(denied, Err(AuthError::Forbidden(Denial::OwnerRequired))));

        let promoted = f.use_case.promote(&f.owner, ann).await.unwrap();
        assert_eq!(promoted.role, UserRole::Admin);

        let demoted = f.use_case.demote(&f.owner, ann).await.unwrap();
        assert_eq!(demoted.role, UserRole::User);

        f.use_case.delete(&f.owner, ann).await.unwrap();
        assert!(f.repo.find_by_id(ann).await.unwrap().is_none());

        let again = f.use_case.promote(&f.owner, ann).await;
        assert!(matches!(again, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_owner_target_is_protected() {
        let f = fixture().await;
        let owner_id = f.owner.id;

        for result in [
            f.use_case.promote(&f.owner, owner_id).await.map(|_| ()),
            f.use_case.demote(&f.owner, owner_id).await.map(|_| ()),
            f.use_case.delete(&f.owner, owner_id).await,
        ] {
            assert!(matches!(
                result,
                Err(AuthError::Forbidden(Denial::OwnerImmutable))
            ));
        }

        let owner = f.repo.find_by_id(owner_id).await.unwrap().unwrap();
        assert_eq!(owner.role, UserRole::Owner);
    }

    #[tokio::test]
    async fn test_denied_actor_cannot_probe_ids() {
        let f = fixture().await;
        let user = Actor::new(register(&f.repo, "Ann", "ann@x.com").await, UserRole::User);

        // Existing and missing targets fail the same way
        let existing = f.use_case.delete(&user, f.owner.id).await;
        let missing = f.use_case.delete(&user, UserId::new(999)).await;
        assert!(matches!(existing, Err(AuthError::Forbidden(Denial::OwnerRequired))));
        assert!(matches!(missing, Err(AuthError::Forbidden(Denial::OwnerRequired))));
    }

    #[tokio::test]
    async fn test_list_excludes_actor_and_is_owner_only() {
        let f = fixture().await;
        let ann = register(&f.repo, "Ann", "ann@x.com").await;
        let bob = register(&f.repo, "Bob", "bob@x.com").await;

        let listed: Vec<UserId> = f
            .use_case
            .list(&f.owner)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(listed, vec![ann, bob]);

        let as_admin = f.use_case.list(&Actor::new(ann, UserRole::Admin)).await;
        assert!(matches!(as_admin, Err(AuthError::Forbidden(Denial::OwnerRequired))));
    }
}
