//! Role Policy
//!
//! Pure authorization rules for user management and article authoring.
//! No I/O; every use case that mutates state asks this module first.
//!
//! Rules:
//! - user management (`ViewAll`, `Promote`, `Demote`, `Delete`) needs an Owner actor
//! - an Owner target can never be promoted, demoted or deleted, not even by an Owner
//! - article authoring needs an Admin or Owner actor

use thiserror::Error;

use crate::domain::entity::{actor::Actor, user::UserProfile};
use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ViewAll,
    Promote,
    Demote,
    Delete,
    CreateArticle,
    UpdateArticle,
    DeleteArticle,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::ViewAll,
        Operation::Promote,
        Operation::Demote,
        Operation::Delete,
        Operation::CreateArticle,
        Operation::UpdateArticle,
        Operation::DeleteArticle,
    ];

    /// Operations whose target is another user record
    pub const fn targets_user(&self) -> bool {
        matches!(self, Operation::Promote | Operation::Demote | Operation::Delete)
    }

    const fn requires_owner(&self) -> bool {
        matches!(self, Operation::ViewAll) || self.targets_user()
    }
}

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Only the owner can manage users")]
    OwnerRequired,

    #[error("Admin or owner role required")]
    AdminRequired,

    #[error("The owner account cannot be modified or deleted")]
    OwnerImmutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial),
        }
    }
}

/// Decide whether `actor` may perform `operation` on a target of `target` role
///
/// `target` is `None` when the target is not known yet. Callers check the
/// actor alone before looking anything up, so a denied caller never learns
/// whether the target exists, then check again with the target's role.
pub fn authorize(actor: UserRole, target: Option<UserRole>, operation: Operation) -> Decision {
    if operation.requires_owner() {
        if !actor.is_owner() {
            return Decision::Deny(Denial::OwnerRequired);
        }
        if operation.targets_user() && target.is_some_and(|role| role.is_owner()) {
            return Decision::Deny(Denial::OwnerImmutable);
        }
        return Decision::Allow;
    }

    if actor.is_admin_or_higher() {
        Decision::Allow
    } else {
        Decision::Deny(Denial::AdminRequired)
    }
}

/// The user list an actor may see: everyone but themselves, Owner only
pub fn visible_to(
    actor: &Actor,
    users: impl IntoIterator<Item = UserProfile>,
) -> Result<Vec<UserProfile>, Denial> {
    authorize(actor.role, None, Operation::ViewAll).into_result()?;
    Ok(users.into_iter().filter(|u| u.id != actor.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{UserId, email::Email, user_name::UserName};
    use chrono::Utc;

    const USER_OPS: [Operation; 3] = [Operation::Promote, Operation::Demote, Operation::Delete];
    const ARTICLE_OPS: [Operation; 3] = [
        Operation::CreateArticle,
        Operation::UpdateArticle,
        Operation::DeleteArticle,
    ];

    #[test]
    fn test_user_management_requires_owner_actor() {
        for op in USER_OPS {
            for actor in [UserRole::User, UserRole::Admin] {
                for target in UserRole::ALL.map(Some).into_iter().chain([None]) {
                    assert_eq!(
                        authorize(actor, target, op),
                        Decision::Deny(Denial::OwnerRequired),
                        "{actor} -> {target:?} {op:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_owner_target_is_immutable() {
        for op in USER_OPS {
            for actor in UserRole::ALL {
                assert!(!authorize(actor, Some(UserRole::Owner), op).is_allowed());
            }
            assert_eq!(
                authorize(UserRole::Owner, Some(UserRole::Owner), op),
                Decision::Deny(Denial::OwnerImmutable)
            );
        }
    }

    #[test]
    fn test_owner_manages_non_owner_targets() {
        for op in USER_OPS {
            for target in [None, Some(UserRole::User), Some(UserRole::Admin)] {
                assert_eq!(authorize(UserRole::Owner, target, op), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_view_all_is_owner_only() {
        assert!(authorize(UserRole::Owner, None, Operation::ViewAll).is_allowed());
        assert_eq!(
            authorize(UserRole::Admin, None, Operation::ViewAll),
            Decision::Deny(Denial::OwnerRequired)
        );
        assert!(!authorize(UserRole::User, None, Operation::ViewAll).is_allowed());
    }

    #[test]
    fn test_article_authoring_requires_admin_or_owner() {
        for op in ARTICLE_OPS {
            for target in UserRole::ALL.map(Some).into_iter().chain([None]) {
                assert_eq!(
                    authorize(UserRole::User, target, op),
                    Decision::Deny(Denial::AdminRequired)
                );
                assert_eq!(authorize(UserRole::Admin, target, op), Decision::Allow);
                assert_eq!(authorize(UserRole::Owner, target, op), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_every_operation_is_covered() {
        // A User actor can do nothing; an Owner can do everything to a non-owner.
        for op in Operation::ALL {
            assert!(!authorize(UserRole::User, Some(UserRole::User), op).is_allowed());
            assert!(authorize(UserRole::Owner, Some(UserRole::User), op).is_allowed());
        }
    }

    fn profile(id: i64, role: UserRole) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: UserId::new(id),
            name: UserName::from_db(format!("user{id}")),
            email: Email::from_db(format!("user{id}@x.com")),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_visible_to_excludes_actor() {
        let owner = Actor::new(UserId::new(1), UserRole::Owner);
        let users = vec![
            profile(1, UserRole::Owner),
            profile(2, UserRole::Admin),
            profile(3, UserRole::User),
        ];

        let visible = visible_to(&owner, users.clone()).unwrap();
        let ids: Vec<i64> = visible.iter().map(|u| u.id.value()).collect();
        assert_eq!(ids, vec![2, 3]);

        let admin = Actor::new(UserId::new(2), UserRole::Admin);
        assert_eq!(visible_to(&admin, users), Err(Denial::OwnerRequired));
    }
}
