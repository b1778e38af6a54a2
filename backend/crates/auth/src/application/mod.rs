//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod manage_users;
pub mod register;
pub mod seed_owner;
pub mod session;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use manage_users::ManageUsersUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use seed_owner::{SeedOutcome, SeedOwnerUseCase};
pub use session::{IssuedSession, SessionClaims, SessionIssuer};
