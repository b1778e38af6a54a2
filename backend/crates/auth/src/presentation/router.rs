//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionIssuer;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_owner, require_session};

/// Authentication and Owner-only user management routes
///
/// - `POST /auth/register`, `POST /auth/login` (public)
/// - `GET /auth/me` (any valid session)
/// - `GET /users`, `PUT /users/{id}/promote`, `PUT /users/{id}/demote`,
///   `DELETE /users/{id}` (Owner)
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let issuer = SessionIssuer::new(config.clone());
    let state = AuthAppState { repo, config };

    let public = Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>));

    let session = Router::new()
        .route("/auth/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            issuer.clone(),
            require_session,
        ));

    let owner = Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route("/users/{id}", axum::routing::delete(handlers::delete_user::<R>))
        .route("/users/{id}/promote", put(handlers::promote_user::<R>))
        .route("/users/{id}/demote", put(handlers::demote_user::<R>))
        .route_layer(middleware::from_fn_with_state(issuer, require_owner));

    public.merge(session).merge(owner).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router() -> Router {
        auth_router_generic(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(AuthConfig::with_random_secret()),
        )
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn register_request(email: &str) -> Request<Body> {
        Request::post("/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "name": "Ann", "email": email, "password": "secret1" }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_me() {
        let router = router();
        let (status, body) = call(&router, register_request("Ann@X.com")).await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["accessToken"].as_str().unwrap().to_owned();

        let (status, me) = call(
            &router,
            Request::get("/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "ann@x.com");
        assert_eq!(me["role"], "User");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let router = router();
        call(&router, register_request("ann@x.com")).await;
        let (status, problem) = call(&router, register_request("ANN@x.com")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(problem["status"], 409);
        assert_eq!(problem["detail"], "Email already in use");
    }

    #[tokio::test]
    async fn test_guards() {
        let router = router();
        let (status, _) = call(
            &router,
            Request::get("/users").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = call(&router, register_request("ann@x.com")).await;
        let token = body["accessToken"].as_str().unwrap().to_owned();
        let (status, problem) = call(
            &router,
            Request::get("/users")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(problem["detail"], "Only the owner can manage users");

        let (status, _) = call(
            &router,
            Request::get("/auth/me")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
