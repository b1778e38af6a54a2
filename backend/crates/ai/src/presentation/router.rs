//! AI Router

use axum::{Router, middleware, routing::post};
use std::sync::Arc;

use auth::SessionIssuer;
use auth::middleware::require_admin;

use crate::application::gateway::AiGateway;
use crate::domain::backend::GenerativeBackend;
use crate::presentation::handlers;

/// AI routes
///
/// - `POST /ai/ask` (public)
/// - `POST /ai/generate-image`, `POST /ai/render-content`, `POST /ai/report`
///   (Admin or Owner)
pub fn ai_router_generic<B>(gateway: Arc<AiGateway<B>>, issuer: SessionIssuer) -> Router
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    let public = Router::new().route("/ai/ask", post(handlers::ask::<B>));

    let admin = Router::new()
        .route("/ai/generate-image", post(handlers::generate_image::<B>))
        .route("/ai/render-content", post(handlers::render_content::<B>))
        .route("/ai/report", post(handlers::report::<B>))
        .route_layer(middleware::from_fn_with_state(issuer, require_admin));

    public.merge(admin).with_state(gateway)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gateway::tests::FakeBackend;
    use auth::application::{LoginInput, LoginUseCase, SeedOwnerUseCase};
    use auth::{AuthConfig, InMemoryUserRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn router(backend: Option<FakeBackend>) -> Router {
        router_with(backend, Arc::new(AuthConfig::with_random_secret()))
    }

    fn router_with(backend: Option<FakeBackend>, config: Arc<AuthConfig>) -> Router {
        ai_router_generic(Arc::new(AiGateway::new(backend)), SessionIssuer::new(config))
    }

    /// Seed the Owner and sign in as them
    async fn owner_token(config: &Arc<AuthConfig>) -> String {
        let users = Arc::new(InMemoryUserRepository::new());
        SeedOwnerUseCase::new(users.clone(), config.clone())
            .execute()
            .await
            .unwrap();
        LoginUseCase::new(users, config.clone())
            .execute(LoginInput {
                email: config.owner_seed.email.clone(),
                password: config.owner_seed.password.clone(),
            })
            .await
            .unwrap()
            .access_token
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_image_requires_admin() {
        let response = router(Some(FakeBackend::default()))
            .oneshot(json_post(
                "/ai/generate-image",
                r#"{"prompt":"lock","aspectRatio":"16:9"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ask_is_public() {
        let response = router(Some(FakeBackend::default()))
            .oneshot(json_post("/ai/ask", r#"{"prompt":"What is XSS?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["state"], "success");
    }

    #[tokio::test]
    async fn test_unconfigured_ask_is_service_unavailable() {
        let response = router(None)
            .oneshot(json_post("/ai/ask", r#"{"prompt":"What is XSS?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_anonymous_render_generates_nothing() {
        let backend = FakeBackend::default();
        let requests = backend.requests.clone();

        let response = router(Some(backend))
            .oneshot(json_post(
                "/ai/render-content",
                r#"{"content":"![gen-image: anything at all]"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_render_content() {
        let config = Arc::new(AuthConfig::with_random_secret());
        let token = owner_token(&config).await;

        let mut request = json_post(
            "/ai/render-content",
            r#"{"content":"x ![gen-image: lock] y ![gen-image: broken]"}"#,
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );

        let backend = FakeBackend {
            fail_on: Some("broken"),
            ..Default::default()
        };
        let response = router_with(Some(backend), config)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["content"],
            "x ![lock](data:image/jpeg;base64,SU1H) y *[Failed to generate image for: \"broken\"]*"
        );
    }
}
