//! Auth Middleware
//!
//! Bearer-token guards for protected routes, and the extractor handlers use
//! to read the verified session.
//!
//! Guards are attached with `route_layer`, so unknown paths still 404:
//! ```rust,ignore
//! Router::new()
//!     .route("/users", get(list_users::<R>))
//!     .route_layer(middleware::from_fn_with_state(issuer, require_owner))
//! ```

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::session::{SessionClaims, SessionIssuer};
use crate::domain::entity::actor::Actor;
use crate::domain::policy::Denial;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Any valid session
pub async fn require_session(
    State(issuer): State<SessionIssuer>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&issuer, req, next, |_| None).await
}

/// Role Admin or Owner
pub async fn require_admin(
    State(issuer): State<SessionIssuer>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&issuer, req, next, |role| {
        (!role.is_admin_or_higher()).then_some(Denial::AdminRequired)
    })
    .await
}

/// Role Owner exactly
pub async fn require_owner(
    State(issuer): State<SessionIssuer>,
    req: Request,
    next: Next,
) -> AuthResult<Response> {
    guard(&issuer, req, next, |role| {
        (!role.is_owner()).then_some(Denial::OwnerRequired)
    })
    .await
}

async fn guard(
    issuer: &SessionIssuer,
    mut req: Request,
    next: Next,
    deny: impl FnOnce(UserRole) -> Option<Denial>,
) -> AuthResult<Response> {
    let token = extract_bearer(req.headers()).ok_or(AuthError::MissingToken)?;
    let claims = issuer.verify(token)?;

    if let Some(denial) = deny(claims.role) {
        tracing::debug!(user_id = %claims.sub, role = %claims.role, path = %req.uri().path(), "Guard denied request");
        return Err(AuthError::Forbidden(denial));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// The verified session of the current request
///
/// Only available behind one of the guards above; elsewhere it rejects
/// with 401.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionClaims);

impl CurrentSession {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AuthError::MissingToken)
    }
}
