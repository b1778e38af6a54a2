//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::middleware::CurrentSession;
use kernel::id::ArticleId;

use crate::application::{ArticleQueryUseCase, ManageArticlesUseCase};
use crate::domain::repository::{ArticleRepository, AuthorDirectory, CoverImageSource};
use crate::domain::value_objects::Category;
use crate::error::ArticleResult;
use crate::presentation::dto::{
    ArticleResponse, CreateArticleRequest, ListQuery, StatsResponse, UpdateArticleRequest,
};

/// Shared state for article handlers
pub struct ArticlesAppState<R, D, C> {
    pub repo: Arc<R>,
    pub authors: Arc<D>,
    pub covers: Arc<C>,
}

impl<R, D, C> Clone for ArticlesAppState<R, D, C> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            authors: self.authors.clone(),
            covers: self.covers.clone(),
        }
    }
}

impl<R, D, C> ArticlesAppState<R, D, C>
where
    R: ArticleRepository,
    D: AuthorDirectory,
    C: CoverImageSource,
{
    fn query(&self) -> ArticleQueryUseCase<R, D> {
        ArticleQueryUseCase::new(self.repo.clone(), self.authors.clone())
    }

    fn manage(&self) -> ManageArticlesUseCase<R, D, C> {
        ManageArticlesUseCase::new(self.repo.clone(), self.authors.clone(), self.covers.clone())
    }
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /articles
pub async fn list_articles<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
    Query(query): Query<ListQuery>,
) -> ArticleResult<Json<Vec<ArticleResponse>>>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    let category = query
        .category
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.parse::<Category>())
        .transpose()?;

    let views = state.query().list(category).await?;
    Ok(Json(views.into_iter().map(ArticleResponse::from).collect()))
}

/// GET /articles/stats
pub async fn article_stats<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
) -> ArticleResult<Json<StatsResponse>>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    Ok(Json(state.query().stats().await?.into()))
}

/// GET /articles/{id}
pub async fn get_article<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
    Path(id): Path<i64>,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    let view = state.query().get(ArticleId::new(id)).await?;
    Ok(Json(view.into()))
}

// ============================================================================
// Authoring (Admin / Owner)
// ============================================================================

/// POST /articles
pub async fn create_article<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
    session: CurrentSession,
    Json(req): Json<CreateArticleRequest>,
) -> ArticleResult<(StatusCode, Json<ArticleResponse>)>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    let view = state.manage().create(&session.actor(), req.into()).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// PUT /articles/{id}
pub async fn update_article<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Json(req): Json<UpdateArticleRequest>,
) -> ArticleResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    let view = state
        .manage()
        .update(&session.actor(), ArticleId::new(id), req.into())
        .await?;
    Ok(Json(view.into()))
}

/// DELETE /articles/{id}
pub async fn delete_article<R, D, C>(
    State(state): State<ArticlesAppState<R, D, C>>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> ArticleResult<StatusCode>
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    state
        .manage()
        .delete(&session.actor(), ArticleId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
