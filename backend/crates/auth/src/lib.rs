//! Auth (Authentication and Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, role policy, repository traits
//! - `application/` - Use cases and the session issuer
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router, guards
//!
//! ## Features
//! - Registration and email + password login
//! - Stateless HMAC-signed bearer tokens with a fixed TTL
//! - Three ordered roles (User < Admin < Owner)
//! - A single Owner, seeded at startup from a fixed email
//! - Owner-only user administration (list, promote, demote, delete)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Login failures never say whether the email or the password was wrong
//! - Policy is checked before any lookup, so denied callers cannot probe ids
//! - The Owner account cannot be promoted, demoted or deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::{SessionClaims, SessionIssuer};
pub use domain::entity::actor::Actor;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::auth_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
