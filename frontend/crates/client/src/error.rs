//! Client Error Types

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an RFC 7807 problem (or at least a status)
    #[error("{status}: {detail}")]
    Api {
        status: u16,
        detail: String,
        action: Option<String>,
    },

    /// Request never completed or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An authenticated route was called without a session
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text suitable for an error toast
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                detail,
                action: Some(action),
                ..
            } => format!("{detail}. {action}"),
            ClientError::Api { detail, .. } => detail.clone(),
            ClientError::NotSignedIn => "Please sign in first.".to_string(),
            _ => "Something went wrong. Please try again later.".to_string(),
        }
    }
}
