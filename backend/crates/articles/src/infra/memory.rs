//! In-Memory Repository Implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::ArticleId;
use tokio::sync::RwLock;

use crate::domain::entities::{Article, ArticlePatch, NewArticle};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::Category;
use crate::error::ArticleResult;

#[derive(Debug)]
struct ArticleTable {
    rows: BTreeMap<ArticleId, Article>,
    next_id: ArticleId,
}

impl Default for ArticleTable {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: ArticleId::new(ArticleId::FIRST),
        }
    }
}

/// In-memory article store; clones share the same table
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticleRepository {
    table: Arc<RwLock<ArticleTable>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> ArticleResult<Article> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id.next();

        let article = article.into_article(id, Utc::now());
        table.rows.insert(id, article.clone());
        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> ArticleResult<Option<Article>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, category: Option<Category>) -> ArticleResult<Vec<Article>> {
        let table = self.table.read().await;
        let mut articles: Vec<Article> = table
            .rows
            .values()
            .filter(|a| category.is_none_or(|c| a.category == c))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(articles)
    }

    async fn update(&self, id: ArticleId, patch: ArticlePatch) -> ArticleResult<Option<Article>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|article| {
            article.apply(patch, Utc::now());
            article.clone()
        }))
    }

    async fn delete(&self, id: ArticleId) -> ArticleResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
