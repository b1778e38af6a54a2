//! Repository Traits
//!
//! The Content Store, plus the two collaborators this context needs from
//! outside: author lookups (identity context) and cover images (AI gateway).

use std::collections::HashMap;

use kernel::id::{ArticleId, UserId};

use crate::domain::entities::{Article, ArticlePatch, AuthorProfile, NewArticle};
use crate::domain::value_objects::Category;
use crate::error::ArticleResult;

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Persist under the next sequential id
    async fn insert(&self, article: NewArticle) -> ArticleResult<Article>;

    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>>;

    /// Newest first (`created_at` desc, then `id` desc), optionally one category
    async fn list(&self, category: Option<Category>) -> ArticleResult<Vec<Article>>;

    /// Apply a patch; `None` when the article no longer exists
    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>>;

    /// Remove an article; `false` when there was nothing to remove
    async fn delete(&self, id: ArticleId) -> ArticleResult<bool>;
}

/// Read-only view of user records for the author projection
#[trait_variant::make(AuthorDirectory: Send)]
pub trait LocalAuthorDirectory {
    /// Profiles for the given ids; missing users are simply absent
    async fn find_authors(&self, ids: &[UserId]) -> ArticleResult<HashMap<UserId, AuthorProfile>>;
}

/// Source of cover images for new articles
#[trait_variant::make(CoverImageSource: Send)]
pub trait LocalCoverImageSource {
    /// Never fails: implementations fall back to a placeholder URL
    async fn cover_image_for(&self, title: &str) -> String;
}
