//! Infrastructure Layer

pub mod directory;
pub mod memory;
pub mod postgres;

pub use directory::UserDirectory;
pub use memory::InMemoryArticleRepository;
pub use postgres::PgArticleRepository;
