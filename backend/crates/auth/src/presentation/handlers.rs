//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, ManageUsersUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, RegisterRequest, SessionResponse, TokenResponse, UserResponse,
};
use crate::presentation::middleware::CurrentSession;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<TokenResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token: session.access_token,
        }),
    ))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: session.access_token,
    }))
}

/// GET /auth/me
pub async fn me(CurrentSession(claims): CurrentSession) -> Json<SessionResponse> {
    Json(claims.into())
}

// ============================================================================
// User Management (Owner)
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    session: CurrentSession,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = ManageUsersUseCase::new(state.repo.clone())
        .list(&session.actor())
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /users/{id}/promote
pub async fn promote_user<R>(
    State(state): State<AuthAppState<R>>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = ManageUsersUseCase::new(state.repo.clone())
        .promote(&session.actor(), UserId::new(id))
        .await?;

    Ok(Json(user.into()))
}

/// PUT /users/{id}/demote
pub async fn demote_user<R>(
    State(state): State<AuthAppState<R>>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = ManageUsersUseCase::new(state.repo.clone())
        .demote(&session.actor(), UserId::new(id))
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    ManageUsersUseCase::new(state.repo.clone())
        .delete(&session.actor(), UserId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
