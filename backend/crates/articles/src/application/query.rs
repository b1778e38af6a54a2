//! Article Query Use Case
//!
//! Public reads: list, get, dashboard stats. Articles are joined with their
//! author's public projection.

use std::sync::Arc;

use kernel::id::{ArticleId, UserId};

use crate::domain::entities::{Article, ArticleView};
use crate::domain::repository::{ArticleRepository, AuthorDirectory};
use crate::domain::services::ArticleStats;
use crate::domain::value_objects::Category;
use crate::error::{ArticleError, ArticleResult};

pub struct ArticleQueryUseCase<R, D>
where
    R: ArticleRepository,
    D: AuthorDirectory,
{
    repo: Arc<R>,
    authors: Arc<D>,
}

impl<R, D> ArticleQueryUseCase<R, D>
where
    R: ArticleRepository,
    D: AuthorDirectory,
{
    pub fn new(repo: Arc<R>, authors: Arc<D>) -> Self {
        Self { repo, authors }
    }

    /// Newest first, optionally restricted to one category
    pub async fn list(&self, category: Option<Category>) -> ArticleResult<Vec<ArticleView>> {
        let articles = self.repo.list(category).await?;
        join_authors(self.authors.as_ref(), articles).await
    }

    pub async fn get(&self, id: ArticleId) -> ArticleResult<ArticleView> {
        let article = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        let mut views = join_authors(self.authors.as_ref(), vec![article]).await?;
        views.pop().ok_or(ArticleError::NotFound)
    }

    pub async fn stats(&self) -> ArticleResult<ArticleStats> {
        let articles = self.repo.list(None).await?;
        Ok(ArticleStats::from_newest_first(&articles))
    }
}

/// Attach author profiles, keeping article order
///
/// One directory call per batch; a deleted author yields `author: None`.
pub(crate) async fn join_authors<D>(
    authors: &D,
    articles: Vec<Article>,
) -> ArticleResult<Vec<ArticleView>>
where
    D: AuthorDirectory,
{
    let mut ids: Vec<UserId> = articles.iter().map(|a| a.author_id).collect();
    ids.sort();
    ids.dedup();

    let profiles = authors.find_authors(&ids).await?;

    Ok(articles
        .into_iter()
        .map(|article| {
            let author = profiles.get(&article.author_id).cloned();
            ArticleView { article, author }
        })
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::entities::{AuthorProfile, NewArticle};
    use crate::domain::value_objects::ArticleText;
    use crate::infra::memory::InMemoryArticleRepository;
    use std::collections::HashMap;

    /// Fixed set of authors for use case tests
    #[derive(Debug, Default)]
    pub(crate) struct FakeDirectory {
        pub authors: HashMap<UserId, AuthorProfile>,
    }

    impl FakeDirectory {
        pub fn with(profiles: impl IntoIterator<Item = (i64, &'static str)>) -> Self {
            let authors = profiles
                .into_iter()
                .map(|(id, name)| {
                    let id = UserId::new(id);
                    (
                        id,
                        AuthorProfile {
                            id,
                            name: name.to_owned(),
                            email: format!("{}@x.com", name.to_lowercase()),
                        },
                    )
                })
                .collect();
            Self { authors }
        }
    }

    impl AuthorDirectory for FakeDirectory {
        async fn find_authors(
            &self,
            ids: &[UserId],
        ) -> ArticleResult<HashMap<UserId, AuthorProfile>> {
            Ok(ids
                .iter()
                .filter_map(|id| self.authors.get(id).map(|p| (*id, p.clone())))
                .collect())
        }
    }

    async fn seed(repo: &InMemoryArticleRepository, title: &str, category: Category, author: i64) {
        repo.insert(NewArticle {
            title: ArticleText::title(title).unwrap(),
            summary: ArticleText::summary("Summary").unwrap(),
            category,
            content: ArticleText::content("Body").unwrap(),
            image_url: String::new(),
            author_id: UserId::new(author),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_joins_authors_and_keeps_order() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        seed(&repo, "one", Category::TechNews, 2).await;
        seed(&repo, "two", Category::AiTools, 9).await;
        seed(&repo, "three", Category::TechNews, 2).await;

        let use_case =
            ArticleQueryUseCase::new(repo, Arc::new(FakeDirectory::with([(2, "Bob")])));
        let views = use_case.list(None).await.unwrap();

        let titles: Vec<&str> = views.iter().map(|v| v.article.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
        assert_eq!(views[0].author.as_ref().unwrap().name, "Bob");
        // Author 9 no longer exists
        assert!(views[1].author.is_none());

        let filtered = use_case.list(Some(Category::AiTools)).await.unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let use_case = ArticleQueryUseCase::new(
            Arc::new(InMemoryArticleRepository::new()),
            Arc::new(FakeDirectory::default()),
        );
        assert!(matches!(
            use_case.get(ArticleId::new(1)).await,
            Err(ArticleError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_stats() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        seed(&repo, "one", Category::TechNews, 2).await;
        seed(&repo, "two", Category::AiTools, 2).await;
        seed(&repo, "three", Category::AiTools, 2).await;

        let stats = ArticleQueryUseCase::new(repo, Arc::new(FakeDirectory::default()))
            .stats()
            .await
            .unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.most_populated, Some(Category::AiTools));
        assert!(stats.last_updated.is_some());
    }
}
