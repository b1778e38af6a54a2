//! AI Gateway Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::text::UNCONFIGURED_MESSAGE;

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    /// No usable API key
    #[error("AI service is not configured")]
    Unconfigured,

    /// Upstream call failed or returned something unusable
    #[error("AI service error: {0}")]
    Upstream(String),

    /// Rejected input (blank prompt, unsupported aspect ratio, ...)
    #[error("{}", .0.message())]
    Validation(AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AiError::Unconfigured => ErrorKind::ServiceUnavailable,
            AiError::Upstream(_) => ErrorKind::BadGateway,
            AiError::Validation(err) => err.kind(),
            AiError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AiError::Unconfigured => AppError::service_unavailable(UNCONFIGURED_MESSAGE)
                .with_action("Set GEMINI_API_KEY and restart the server"),
            // Upstream detail stays in the logs
            AiError::Upstream(_) => AppError::bad_gateway("AI service request failed"),
            AiError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_owned());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_owned()),
                    None => app_err,
                }
            }
            AiError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    fn log(&self) {
        match self {
            AiError::Upstream(msg) => {
                tracing::error!(message = %msg, "AI upstream failure");
            }
            AiError::Internal(msg) => {
                tracing::error!(message = %msg, "AI internal error");
            }
            AiError::Unconfigured => {
                tracing::warn!("AI request while unconfigured");
            }
            AiError::Validation(_) => {
                tracing::debug!(error = %self, "AI request rejected");
            }
        }
    }
}

impl IntoResponse for AiError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AiError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AiError::Validation(err)
        } else {
            AiError::Internal(err.to_string())
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AiError::Unconfigured.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            AiError::Upstream("quota".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        let validation: AiError = AppError::bad_request("Prompt cannot be empty").into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unconfigured_detail() {
        let app_err = AiError::Unconfigured.to_app_error();
        assert_eq!(app_err.message(), "API_KEY is not configured.");
        assert!(app_err.action().is_some());
    }

    #[test]
    fn test_upstream_detail_is_not_exposed() {
        let app_err = AiError::Upstream("key AIza... rejected".into()).to_app_error();
        assert_eq!(app_err.message(), "AI service request failed");
    }
}
