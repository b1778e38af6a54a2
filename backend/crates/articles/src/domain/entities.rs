//! Domain Entities

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ArticleId, UserId};

use crate::domain::value_objects::{ArticleText, Category};

/// A persisted article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleText,
    pub summary: ArticleText,
    pub category: Category,
    pub content: ArticleText,
    /// Cover image: a data URI or a placeholder URL, fixed at creation
    pub image_url: String,
    /// Immutable after creation
    pub author_id: UserId,
    /// Immutable after creation
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Publication date shown with the article
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Apply an update; only the four mutable fields can change
    pub fn apply(&mut self, patch: ArticlePatch, now: DateTime<Utc>) {
        let ArticlePatch {
            title,
            summary,
            category,
            content,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(summary) = summary {
            self.summary = summary;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = now;
    }
}

/// An article that has not been stored yet; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleText,
    pub summary: ArticleText,
    pub category: Category,
    pub content: ArticleText,
    pub image_url: String,
    pub author_id: UserId,
}

impl NewArticle {
    pub fn into_article(self, id: ArticleId, now: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            summary: self.summary,
            category: self.category,
            content: self.content,
            image_url: self.image_url,
            author_id: self.author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves the field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<ArticleText>,
    pub summary: Option<ArticleText>,
    pub category: Option<Category>,
    pub content: Option<ArticleText>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.category.is_none()
            && self.content.is_none()
    }
}

/// Minimal author projection joined onto articles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// An article as readers see it
///
/// `author` is `None` when the author account has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub article: Article,
    pub author: Option<AuthorProfile>,
}
