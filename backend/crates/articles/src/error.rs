//! Article Error Types

use auth::domain::policy::Denial;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ArticleResult<T> = Result<T, ArticleError>;

#[derive(Debug, Error)]
pub enum ArticleError {
    /// Generic on purpose: no id in the message
    #[error("Article not found")]
    NotFound,

    /// Role policy denial
    #[error("{0}")]
    Forbidden(#[from] Denial),

    /// Rejected input (blank title, unknown category, ...)
    #[error("{}", .0.message())]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArticleError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ArticleError::NotFound => ErrorKind::NotFound,
            ArticleError::Forbidden(_) => ErrorKind::Forbidden,
            ArticleError::Validation(err) => err.kind(),
            ArticleError::Database(_) | ArticleError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ArticleError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_owned());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_owned()),
                    None => app_err,
                }
            }
            ArticleError::Database(_) | ArticleError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ArticleError::Database(e) => {
                tracing::error!(error = %e, "Article database error");
            }
            ArticleError::Internal(msg) => {
                tracing::error!(message = %msg, "Article internal error");
            }
            ArticleError::Forbidden(denial) => {
                tracing::warn!(reason = ?denial, "Article operation denied");
            }
            _ => {
                tracing::debug!(error = %self, "Article error");
            }
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ArticleError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            ArticleError::Validation(err)
        } else {
            ArticleError::Internal(err.to_string())
        }
    }
}

/// Author lookups go through the identity store
impl From<auth::AuthError> for ArticleError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::Database(e) => ArticleError::Database(e),
            other => ArticleError::Internal(other.to_string()),
        }
    }
}
