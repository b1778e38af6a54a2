//! Router composition
//!
//! Wires the feature routers together over injected stores, independent of
//! how the stores are backed.

use std::sync::Arc;

use ai::{AiGateway, GenerativeBackend, ai_router_generic};
use articles::{ArticleRepository, CoverImageSource, UserDirectory, articles_router_generic};
use auth::domain::repository::UserRepository;
use auth::{AuthConfig, SessionIssuer, auth_router_generic};
use axum::{Router, routing::get};

/// Article covers come from the AI gateway, placeholder on failure
pub struct GatewayCovers<B>(pub Arc<AiGateway<B>>);

impl<B> CoverImageSource for GatewayCovers<B>
where
    B: GenerativeBackend + Send + Sync,
{
    async fn cover_image_for(&self, title: &str) -> String {
        self.0.generate_article_cover_image(title).await
    }
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

pub fn build_app<U, A, B>(
    users: Arc<U>,
    articles: Arc<A>,
    gateway: Arc<AiGateway<B>>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    A: ArticleRepository + Send + Sync + 'static,
    B: GenerativeBackend + Send + Sync + 'static,
{
    let issuer = SessionIssuer::new(auth_config.clone());
    let authors = Arc::new(UserDirectory::new(users.clone()));
    let covers = Arc::new(GatewayCovers(gateway.clone()));

    Router::new()
        .route("/health", get(health))
        .merge(auth_router_generic(users, auth_config))
        .merge(articles_router_generic(articles, authors, covers, issuer.clone()))
        .merge(ai_router_generic(gateway, issuer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai::AiError;
    use ai::domain::{GeneratedImage, ImageRequest};
    use articles::InMemoryArticleRepository;
    use auth::InMemoryUserRepository;
    use auth::application::SeedOwnerUseCase;
    use auth::application::config::{DEFAULT_OWNER_PASSWORD, OWNER_EMAIL};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Upstream that is always down
    struct DownBackend;

    impl GenerativeBackend for DownBackend {
        async fn generate_image(&self, _request: &ImageRequest) -> ai::AiResult<GeneratedImage> {
            Err(AiError::Upstream("connection refused".into()))
        }

        async fn generate_text(&self, _prompt: &str) -> ai::AiResult<String> {
            Err(AiError::Upstream("connection refused".into()))
        }
    }

    async fn app() -> Router {
        let users = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        SeedOwnerUseCase::new(users.clone(), config.clone())
            .execute()
            .await
            .unwrap();

        build_app(
            users,
            Arc::new(InMemoryArticleRepository::new()),
            Arc::new(AiGateway::new(Some(DownBackend))),
            config,
        )
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register(app: &Router, name: &str, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["accessToken"].as_str().unwrap().to_owned()
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_owned()
    }

    async fn user_id(app: &Router, token: &str) -> i64 {
        let (_, me) = send(app, Method::GET, "/auth/me", Some(token), None).await;
        me["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = app().await;
        register(&app, "Ann", "ann@x.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": "Ann 2", "email": "ANN@x.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Email already in use");
    }

    #[tokio::test]
    async fn test_ann_scenario() {
        let app = app().await;
        let owner = login(&app, OWNER_EMAIL, DEFAULT_OWNER_PASSWORD).await;

        let bob = register(&app, "Bob", "bob@x.com").await;
        let bob_id = user_id(&app, &bob).await;
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/users/{bob_id}/promote"),
            Some(&owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Role is baked into the token; log in again as Admin
        let bob = login(&app, "bob@x.com", "secret1").await;

        let ann = register(&app, "Ann", "ann@x.com").await;
        let ann_id = user_id(&app, &ann).await;
        let promote = format!("/users/{ann_id}/promote");

        let (status, _) = send(&app, Method::PUT, &promote, Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, Method::PUT, &promote, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "Admin");
        assert!(body.get("passwordHash").is_none());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/users/{ann_id}/demote"),
            Some(&owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "User");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/users/{ann_id}"),
            Some(&owner),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::PUT, &promote, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_article_is_listed_first_with_author() {
        let app = app().await;
        let owner = login(&app, OWNER_EMAIL, DEFAULT_OWNER_PASSWORD).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/articles",
            Some(&owner),
            Some(json!({
                "title": "Older",
                "summary": "s",
                "category": "Tech News",
                "content": "c"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let bob = register(&app, "Bob", "bob@x.com").await;
        let bob_id = user_id(&app, &bob).await;
        assert_eq!(bob_id, 2);
        send(
            &app,
            Method::PUT,
            &format!("/users/{bob_id}/promote"),
            Some(&owner),
            None,
        )
        .await;
        let bob = login(&app, "bob@x.com", "secret1").await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/articles",
            Some(&bob),
            Some(json!({
                "title": "Zero Day Roundup",
                "summary": "What broke this week",
                "category": "Ethical Hacking",
                "content": "Body"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        // Upstream is down, so the cover falls back to the placeholder
        assert_eq!(
            created["imageUrl"],
            "https://picsum.photos/seed/Zero_Day_Roundup/600/400"
        );

        let (status, list) = send(&app, Method::GET, "/articles", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let first = &list[0];
        assert_eq!(first["title"], "Zero Day Roundup");
        assert_eq!(first["authorId"], 2);
        assert_eq!(
            first["author"],
            json!({ "id": 2, "name": "Bob", "email": "bob@x.com" })
        );
        assert_eq!(list[1]["title"], "Older");
    }

    #[tokio::test]
    async fn test_article_guards_and_not_found() {
        let app = app().await;
        let user = register(&app, "Eve", "eve@x.com").await;
        let body = json!({ "title": "t", "summary": "s", "category": "AI Tools", "content": "c" });

        let (status, _) = send(&app, Method::POST, "/articles", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/articles", Some(&user), Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let owner = login(&app, OWNER_EMAIL, DEFAULT_OWNER_PASSWORD).await;
        let (status, problem) = send(
            &app,
            Method::PUT,
            "/articles/77",
            Some(&owner),
            Some(json!({ "title": "new" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(problem["detail"], "Article not found");

        let (status, _) = send(&app, Method::DELETE, "/articles/77", Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/articles/77", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_failure_is_reported_in_state() {
        let app = app().await;
        let owner = login(&app, OWNER_EMAIL, DEFAULT_OWNER_PASSWORD).await;

        let (status, body) = send(&app, Method::POST, "/ai/report", Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "error");
        assert_eq!(body["response"], "An error occurred while generating the report.");
    }
}
