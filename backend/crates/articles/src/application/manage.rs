//! Manage Articles Use Case
//!
//! Admin/Owner authoring: create, update, delete.
//!
//! Update and delete check the policy, then look the article up
//! (`NotFound`), then mutate. A delete racing between the lookup and the
//! mutation turns an update into `NotFound` and a delete into a no-op.

use std::sync::Arc;

use auth::Actor;
use auth::domain::policy::{self, Operation};
use kernel::id::ArticleId;

use crate::application::query::join_authors;
use crate::domain::entities::{Article, ArticlePatch, ArticleView, NewArticle};
use crate::domain::repository::{ArticleRepository, AuthorDirectory, CoverImageSource};
use crate::domain::value_objects::{ArticleText, Category};
use crate::error::{ArticleError, ArticleResult};

/// Fields of a new article; the author is the caller
pub struct CreateArticleInput {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub content: String,
}

/// Fields to replace; absent fields stay as they are
#[derive(Default)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
}

impl UpdateArticleInput {
    fn into_patch(self) -> ArticleResult<ArticlePatch> {
        Ok(ArticlePatch {
            title: self.title.map(ArticleText::title).transpose()?,
            summary: self.summary.map(ArticleText::summary).transpose()?,
            category: self
                .category
                .map(|c| c.parse::<Category>())
                .transpose()?,
            content: self.content.map(ArticleText::content).transpose()?,
        })
    }
}

pub struct ManageArticlesUseCase<R, D, C>
where
    R: ArticleRepository,
    D: AuthorDirectory,
    C: CoverImageSource,
{
    repo: Arc<R>,
    authors: Arc<D>,
    covers: Arc<C>,
}

impl<R, D, C> ManageArticlesUseCase<R, D, C>
where
    R: ArticleRepository,
    D: AuthorDirectory,
    C: CoverImageSource,
{
    pub fn new(repo: Arc<R>, authors: Arc<D>, covers: Arc<C>) -> Self {
        Self {
            repo,
            authors,
            covers,
        }
    }

    pub async fn create(&self, actor: &Actor, input: CreateArticleInput) -> ArticleResult<ArticleView> {
        policy::authorize(actor.role, None, Operation::CreateArticle).into_result()?;

        let title = ArticleText::title(input.title)?;
        let summary = ArticleText::summary(input.summary)?;
        let category = input.category.parse::<Category>()?;
        let content = ArticleText::content(input.content)?;

        let image_url = self.covers.cover_image_for(title.as_str()).await;

        let article = self
            .repo
            .insert(NewArticle {
                title,
                summary,
                category,
                content,
                image_url,
                author_id: actor.id,
            })
            .await?;

        tracing::info!(
            article_id = %article.id,
            author_id = %actor.id,
            category = %article.category,
            "Article created"
        );

        self.view(article).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: ArticleId,
        input: UpdateArticleInput,
    ) -> ArticleResult<ArticleView> {
        policy::authorize(actor.role, None, Operation::UpdateArticle).into_result()?;
        let patch = input.into_patch()?;

        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        let article = self
            .repo
            .update(id, patch)
            .await?
            .ok_or(ArticleError::NotFound)?;

        tracing::info!(article_id = %id, actor_id = %actor.id, "Article updated");
        self.view(article).await
    }

    pub async fn delete(&self, actor: &Actor, id: ArticleId) -> ArticleResult<()> {
        policy::authorize(actor.role, None, Operation::DeleteArticle).into_result()?;

        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound)?;

        if !self.repo.delete(id).await? {
            tracing::debug!(article_id = %id, "Article already deleted");
        }

        tracing::info!(article_id = %id, actor_id = %actor.id, "Article deleted");
        Ok(())
    }

    async fn view(&self, article: Article) -> ArticleResult<ArticleView> {
        join_authors(self.authors.as_ref(), vec![article])
            .await?
            .pop()
            .ok_or_else(|| ArticleError::Internal("Author join dropped the article".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query::tests::FakeDirectory;
    use crate::infra::memory::InMemoryArticleRepository;
    use auth::UserRole;
    use auth::domain::policy::Denial;
    use kernel::id::UserId;

    /// Cover source that always degrades to the placeholder
    struct PlaceholderCovers;

    impl CoverImageSource for PlaceholderCovers {
        async fn cover_image_for(&self, title: &str) -> String {
            format!("https://picsum.photos/seed/{}/600/400", title.replace(' ', "_"))
        }
    }

    type UseCase = ManageArticlesUseCase<InMemoryArticleRepository, FakeDirectory, PlaceholderCovers>;

    fn use_case() -> (Arc<InMemoryArticleRepository>, UseCase) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let use_case = ManageArticlesUseCase::new(
            repo.clone(),
            Arc::new(FakeDirectory::with([(1, "Wolf"), (2, "Bob")])),
            Arc::new(PlaceholderCovers),
        );
        (repo, use_case)
    }

    fn admin() -> Actor {
        Actor::new(UserId::new(2), UserRole::Admin)
    }

    fn input(title: &str) -> CreateArticleInput {
        CreateArticleInput {
            title: title.into(),
            summary: "Short".into(),
            category: "Ethical Hacking".into(),
            content: "Long body".into(),
        }
    }

    #[tokio::test]
    async fn test_create_by_admin_sets_author_and_cover() {
        let (_, use_case) = use_case();
        let view = use_case.create(&admin(), input("Zero Day")).await.unwrap();

        assert_eq!(view.article.author_id, UserId::new(2));
        assert_eq!(view.article.category, Category::EthicalHacking);
        assert_eq!(
            view.article.image_url,
            "https://picsum.photos/seed/Zero_Day/600/400"
        );
        assert_eq!(view.author.unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_create_by_user_is_forbidden_and_stores_nothing() {
        let (repo, use_case) = use_case();
        let user = Actor::new(UserId::new(3), UserRole::User);

        let result = use_case.create(&user, input("Nope")).await;
        assert!(matches!(result, Err(ArticleError::Forbidden(Denial::AdminRequired))));
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category() {
        let (_, use_case) = use_case();
        let mut bad = input("Title");
        bad.category = "Gossip".into();

        let err = use_case.create(&admin(), bad).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_preserves_author_and_creation() {
        let (_, use_case) = use_case();
        let created = use_case.create(&admin(), input("Before")).await.unwrap().article;

        let owner = Actor::new(UserId::new(1), UserRole::Owner);
        let updated = use_case
            .update(
                &owner,
                created.id,
                UpdateArticleInput {
                    title: Some("After".into()),
                    category: Some("AI Tools".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .article;

        assert_eq!(updated.title.as_str(), "After");
        assert_eq!(updated.category, Category::AiTools);
        assert_eq!(updated.summary, created.summary);
        assert_eq!(updated.author_id, created.author_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.date(), created.date());
        assert_eq!(updated.image_url, created.image_url);
    }

    #[tokio::test]
    async fn test_missing_article_leaves_store_unchanged() {
        let (repo, use_case) = use_case();
        use_case.create(&admin(), input("Kept")).await.unwrap();
        let before = repo.list(None).await.unwrap();

        let missing = ArticleId::new(99);
        let update = use_case
            .update(&admin(), missing, UpdateArticleInput::default())
            .await;
        assert!(matches!(update, Err(ArticleError::NotFound)));

        let delete = use_case.delete(&admin(), missing).await;
        assert!(matches!(delete, Err(ArticleError::NotFound)));

        assert_eq!(repo.list(None).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, use_case) = use_case();
        let id = use_case.create(&admin(), input("Gone")).await.unwrap().article.id;

        let user = Actor::new(UserId::new(3), UserRole::User);
        assert!(matches!(
            use_case.delete(&user, id).await,
            Err(ArticleError::Forbidden(Denial::AdminRequired))
        ));

        use_case.delete(&admin(), id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
