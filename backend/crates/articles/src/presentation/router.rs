//! Articles Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use auth::SessionIssuer;
use auth::middleware::require_admin;

use crate::domain::repository::{ArticleRepository, AuthorDirectory, CoverImageSource};
use crate::presentation::handlers::{self, ArticlesAppState};

/// Article routes
///
/// - `GET /articles`, `GET /articles/stats`, `GET /articles/{id}` (public)
/// - `POST /articles`, `PUT /articles/{id}`, `DELETE /articles/{id}` (Admin or Owner)
pub fn articles_router_generic<R, D, C>(
    repo: Arc<R>,
    authors: Arc<D>,
    covers: Arc<C>,
    issuer: SessionIssuer,
) -> Router
where
    R: ArticleRepository + Send + Sync + 'static,
    D: AuthorDirectory + Send + Sync + 'static,
    C: CoverImageSource + Send + Sync + 'static,
{
    let state = ArticlesAppState {
        repo,
        authors,
        covers,
    };

    let public = Router::new()
        .route("/articles", get(handlers::list_articles::<R, D, C>))
        .route("/articles/stats", get(handlers::article_stats::<R, D, C>))
        .route("/articles/{id}", get(handlers::get_article::<R, D, C>));

    let authoring = Router::new()
        .route("/articles", post(handlers::create_article::<R, D, C>))
        .route(
            "/articles/{id}",
            axum::routing::put(handlers::update_article::<R, D, C>)
                .delete(handlers::delete_article::<R, D, C>),
        )
        .route_layer(middleware::from_fn_with_state(issuer, require_admin));

    public.merge(authoring).with_state(state)
}
