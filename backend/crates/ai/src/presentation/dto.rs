//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::text::{TextResult, TextState};

/// POST /ai/generate-image
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: String,
    /// `"16:9"` or `"4:3"`
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// `data:` URI
    pub image_data: String,
}

/// POST /ai/ask
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

/// Text channel snapshot
#[derive(Debug, Clone, Serialize)]
pub struct TextResponse {
    pub state: TextState,
    pub response: String,
}

impl From<TextResult> for TextResponse {
    fn from(result: TextResult) -> Self {
        Self {
            state: result.state,
            response: result.response,
        }
    }
}

/// POST /ai/render-content
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentBody {
    pub content: String,
}
