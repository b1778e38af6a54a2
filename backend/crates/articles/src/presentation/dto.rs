//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use kernel::id::{ArticleId, UserId};

use crate::application::{CreateArticleInput, UpdateArticleInput};
use crate::domain::entities::{ArticleView, AuthorProfile};
use crate::domain::services::ArticleStats;
use crate::domain::value_objects::Category;

// ============================================================================
// Requests
// ============================================================================

/// GET /articles?category=...
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub content: String,
}

impl From<CreateArticleRequest> for CreateArticleInput {
    fn from(req: CreateArticleRequest) -> Self {
        Self {
            title: req.title,
            summary: req.summary,
            category: req.category,
            content: req.content,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
}

impl From<UpdateArticleRequest> for UpdateArticleInput {
    fn from(req: UpdateArticleRequest) -> Self {
        Self {
            title: req.title,
            summary: req.summary,
            category: req.category,
            content: req.content,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Public author projection; never carries credentials or role
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<AuthorProfile> for AuthorResponse {
    fn from(profile: AuthorProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: ArticleId,
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub content: String,
    pub image_url: String,
    pub author_id: UserId,
    /// `null` once the author account is deleted
    pub author: Option<AuthorResponse>,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleView> for ArticleResponse {
    fn from(view: ArticleView) -> Self {
        let ArticleView { article, author } = view;
        Self {
            date: article.date(),
            id: article.id,
            title: article.title.as_str().to_owned(),
            summary: article.summary.as_str().to_owned(),
            category: article.category,
            content: article.content.as_str().to_owned(),
            image_url: article.image_url,
            author_id: article.author_id,
            author: author.map(AuthorResponse::from),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// GET /articles/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
    pub most_populated: Option<Category>,
    pub last_updated: Option<NaiveDate>,
}

impl From<ArticleStats> for StatsResponse {
    fn from(stats: ArticleStats) -> Self {
        Self {
            total: stats.total,
            categories: stats
                .category_counts
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            most_populated: stats.most_populated,
            last_updated: stats.last_updated,
        }
    }
}
