//! Image value objects

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported output shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Article covers
    #[serde(rename = "16:9")]
    #[display("16:9")]
    Wide,
    /// Images embedded in article bodies
    #[serde(rename = "4:3")]
    #[display("4:3")]
    Standard,
}

impl AspectRatio {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Wide),
            "4:3" => Ok(AspectRatio::Standard),
            other => Err(AppError::bad_request(format!("Unsupported aspect ratio: {other}"))
                .with_action("Use 16:9 or 4:3")),
        }
    }
}

/// What the backend is asked to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Full prompt, already wrapped in the house style
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

/// Raw image as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl GeneratedImage {
    pub const DEFAULT_MIME_TYPE: &'static str = "image/jpeg";

    /// `data:<mime>;base64,<bytes>`, usable directly as an image URL
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Deterministic stand-in cover used whenever generation is unavailable
///
/// Whitespace in the title becomes `_`, the rest is percent-encoded.
pub fn placeholder_cover(title: &str) -> String {
    let seed: String = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!(
        "https://picsum.photos/seed/{}/600/400",
        urlencoding::encode(&seed)
    )
}
