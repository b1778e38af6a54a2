//! Application Layer
//!
//! Use cases for reading and authoring articles.

pub mod manage;
pub mod query;

// Re-exports
pub use manage::{CreateArticleInput, ManageArticlesUseCase, UpdateArticleInput};
pub use query::ArticleQueryUseCase;
