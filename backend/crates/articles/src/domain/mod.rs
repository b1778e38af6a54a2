//! Domain Layer
//!
//! Contains entities, value objects, domain services, and repository traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{Article, ArticlePatch, ArticleView, AuthorProfile, NewArticle};
pub use services::ArticleStats;
pub use repository::{ArticleRepository, AuthorDirectory, CoverImageSource};
pub use value_objects::{ArticleText, Category};
