//! Infrastructure Layer
//!
//! Store implementations: PostgreSQL for deployments, in-memory for
//! development and tests.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
