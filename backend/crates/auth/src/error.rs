//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::policy::Denial;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that is already present
    #[error("Email already in use")]
    EmailTaken,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a guarded route
    #[error("Authentication required")]
    MissingToken,

    /// Bad signature, malformed or expired token
    #[error("Session is invalid or expired")]
    SessionInvalid,

    /// Role policy denial
    #[error("{0}")]
    Forbidden(#[from] Denial),

    /// Target user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Rejected input (email format, password policy, name)
    #[error("{}", .0.message())]
    Validation(AppError),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Forbidden(_) => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Validation(err) => err.kind(),
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Internal details stay in the logs; the body only gets a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_owned());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_owned()),
                    None => app_err,
                }
            }
            AuthError::EmailTaken => AppError::conflict(self.to_string())
                .with_action("Sign in instead, or register with a different email"),
            AuthError::MissingToken => AppError::unauthorized(self.to_string())
                .with_action("Send an Authorization: Bearer <token> header"),
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionInvalid => {
                tracing::warn!("Rejected invalid or expired session token");
            }
            AuthError::Forbidden(denial) => {
                tracing::warn!(reason = ?denial, "Role policy denied request");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err)
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}
