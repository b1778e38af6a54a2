//! Actor
//!
//! The authenticated caller of an operation, as established by a verified
//! session token. Use cases take an `Actor` instead of a whole `User`: the
//! role in the token is what authorizes the request.

use crate::domain::value_object::{UserId, user_role::UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub const fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }
}
