//! Articles Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Article entity, category, stats, repository traits
//! - `application/` - Query and authoring use cases
//! - `infra/` - PostgreSQL and in-memory stores, author directory
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Reads are public. Create, update and delete need an Admin or Owner
//! session; the author of a new article is always the caller.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::{ArticleRepository, AuthorDirectory, CoverImageSource};
pub use domain::value_objects::Category;
pub use error::{ArticleError, ArticleResult};
pub use infra::{InMemoryArticleRepository, PgArticleRepository, UserDirectory};
pub use presentation::router::articles_router_generic;
