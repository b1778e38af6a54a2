//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{Article, ArticlePatch, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::{ArticleText, Category};
use crate::error::{ArticleError, ArticleResult};

/// PostgreSQL-backed article repository
///
/// The category column holds the display label (`"Tech News"`, ...).
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ARTICLE_COLUMNS: &str =
    "id, title, summary, category, content, image_url, author_id, created_at, updated_at";

impl ArticleRepository for PgArticleRepository {
    async fn insert(&self, article: NewArticle) -> ArticleResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO articles (title, summary, category, content, image_url, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article.title.as_str())
        .bind(article.summary.as_str())
        .bind(article.category.label())
        .bind(article.content.as_str())
        .bind(&article.image_url)
        .bind(article.author_id.value())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.into_article()
    }

    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn list(&self, category: Option<Category>) -> ArticleResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS} FROM articles
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(category.map(|c| c.label()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ArticleRow::into_article).collect()
    }

    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            UPDATE articles
            SET title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                category = COALESCE($4, category),
                content = COALESCE($5, content),
                updated_at = $6
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(id.value())
        .bind(patch.title.as_ref().map(ArticleText::as_str))
        .bind(patch.summary.as_ref().map(ArticleText::as_str))
        .bind(patch.category.map(|c| c.label()))
        .bind(patch.content.as_ref().map(ArticleText::as_str))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn delete(&self, id: ArticleId) -> ArticleResult<bool> {
        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    summary: String,
    category: String,
    content: String,
    image_url: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> ArticleResult<Article> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| ArticleError::Internal(format!("Invalid category: {}", self.category)))?;

        Ok(Article {
            id: ArticleId::new(self.id),
            title: ArticleText::from_db(self.title),
            summary: ArticleText::from_db(self.summary),
            category,
            content: ArticleText::from_db(self.content),
            image_url: self.image_url,
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
