use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Closed, totally ordered role set: `User < Admin < Owner`
///
/// The discriminant is what the database stores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize,
)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    #[display("User")]
    User = 0,
    #[display("Admin")]
    Admin = 1,
    #[display("Owner")]
    Owner = 2,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Admin, UserRole::Owner];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Owner)
    }

    #[inline]
    pub const fn is_owner(&self) -> bool {
        matches!(self, UserRole::Owner)
    }

    /// Decode a stored discriminant; unknown values are rejected, not guessed
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::User),
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Owner),
            _ => {
                tracing::error!(role_id = id, "Invalid UserRole id");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_id(role.id()), Some(role));
        }
        assert_eq!(UserRole::from_id(3), None);
        assert_eq!(UserRole::from_id(-1), None);
    }

    #[test]
    fn test_user_role_ordering() {
        assert!(UserRole::Owner > UserRole::Admin);
        assert!(UserRole::Admin > UserRole::User);
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn test_user_role_display_and_serde() {
        assert_eq!(UserRole::Owner.to_string(), "Owner");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"Admin\"");
        let role: UserRole = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_user_role_checks() {
        assert!(!UserRole::User.is_admin_or_higher());
        assert!(UserRole::Admin.is_admin_or_higher());
        assert!(UserRole::Owner.is_admin_or_higher());
        assert!(!UserRole::Admin.is_owner());
        assert!(UserRole::Owner.is_owner());
    }
}
