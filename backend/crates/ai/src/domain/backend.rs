//! Generative backend port

use crate::domain::image::{GeneratedImage, ImageRequest};
use crate::error::AiResult;

/// Upstream image and text generation
#[trait_variant::make(GenerativeBackend: Send)]
pub trait LocalGenerativeBackend {
    /// One image for the request
    async fn generate_image(&self, request: &ImageRequest) -> AiResult<GeneratedImage>;

    /// Free-form text completion
    async fn generate_text(&self, prompt: &str) -> AiResult<String>;
}
