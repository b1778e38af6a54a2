//! Application Configuration
//!
//! Configuration for the AI gateway.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// AI gateway configuration
#[derive(Clone)]
pub struct AiConfig {
    /// `None` (or a `YOUR_...` placeholder) leaves the gateway unconfigured
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    /// Whole-request timeout for upstream calls
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl AiConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            ..Default::default()
        }
    }

    /// The API key, unless missing, blank or a template placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("YOUR_"))
    }

    pub fn is_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("text_model", &self.text_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
