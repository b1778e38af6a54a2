//! AI Gateway
//!
//! Facade over a `GenerativeBackend`. Only the cover image swallows
//! failures (it falls back to a placeholder); every other operation reports
//! them, either as an error or as an `error` text state. Nothing is kept
//! between calls.

use kernel::error::app_error::AppError;

use crate::domain::backend::GenerativeBackend;
use crate::domain::image::{AspectRatio, GeneratedImage, ImageRequest, placeholder_cover};
use crate::domain::prompt;
use crate::domain::text::{
    ASSISTANT_FAILURE_MESSAGE, REPORT_FAILURE_MESSAGE, TextChannel, TextResult,
};
use crate::error::{AiError, AiResult};

/// Most `![gen-image: ...]` tags rendered per call; later tags are left as written
pub const MAX_INLINE_IMAGES: usize = 4;

pub struct AiGateway<B> {
    backend: Option<B>,
}

impl<B> AiGateway<B>
where
    B: GenerativeBackend,
{
    /// `None` builds an unconfigured gateway: it never panics, but every
    /// generation call fails with `Unconfigured`
    pub fn new(backend: Option<B>) -> Self {
        if backend.is_none() {
            tracing::error!("AI API key not configured; generation is disabled");
        }
        Self { backend }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> AiResult<&B> {
        self.backend.as_ref().ok_or(AiError::Unconfigured)
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// 16:9 cover for an article title; never fails
    pub async fn generate_article_cover_image(&self, title: &str) -> String {
        let request = ImageRequest {
            prompt: prompt::cover_image(title),
            aspect_ratio: AspectRatio::Wide,
        };

        match self.render(&request).await {
            Ok(image) => image.to_data_uri(),
            Err(e) => {
                tracing::warn!(error = %e, "Cover image generation failed; using placeholder");
                placeholder_cover(title)
            }
        }
    }

    /// 4:3 illustration for an inline `![gen-image: ...]` tag
    pub async fn generate_inline_image(&self, description: &str) -> AiResult<String> {
        let request = ImageRequest {
            prompt: prompt::inline_image(description),
            aspect_ratio: AspectRatio::Standard,
        };
        Ok(self.render(&request).await?.to_data_uri())
    }

    /// Free-form image with the caller's prompt, returned as a data URI
    pub async fn generate_image(&self, prompt: &str, aspect_ratio: AspectRatio) -> AiResult<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::bad_request("Prompt cannot be empty").into());
        }

        let request = ImageRequest {
            prompt: prompt.to_owned(),
            aspect_ratio,
        };
        Ok(self.render(&request).await?.to_data_uri())
    }

    async fn render(&self, request: &ImageRequest) -> AiResult<GeneratedImage> {
        let image = self.backend()?.generate_image(request).await?;
        tracing::debug!(aspect_ratio = %request.aspect_ratio, "Image generated");
        Ok(image)
    }

    /// Replace the first [`MAX_INLINE_IMAGES`] `![gen-image: prompt]` tags
    /// with generated images
    ///
    /// A failed tag becomes an inline error note; the rest of the content
    /// is returned untouched.
    pub async fn render_inline_images(&self, content: &str) -> String {
        let mut tags = prompt::image_tags(content);
        if tags.is_empty() {
            return content.to_owned();
        }
        if tags.len() > MAX_INLINE_IMAGES {
            tracing::warn!(
                found = tags.len(),
                limit = MAX_INLINE_IMAGES,
                "Too many inline image tags; rendering the first ones only"
            );
            tags.truncate(MAX_INLINE_IMAGES);
        }

        let mut rendered = String::with_capacity(content.len());
        let mut cursor = 0;

        for tag in tags {
            rendered.push_str(&content[cursor..tag.start]);
            match self.generate_inline_image(tag.prompt).await {
                Ok(uri) => rendered.push_str(&format!("![{}]({uri})", tag.prompt)),
                Err(e) => {
                    tracing::warn!(prompt = %tag.prompt, error = %e, "Inline image generation failed");
                    rendered.push_str(&format!(
                        "*[Failed to generate image for: \"{}\"]*",
                        tag.prompt
                    ));
                }
            }
            cursor = tag.end;
        }

        rendered.push_str(&content[cursor..]);
        rendered
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    /// Ask the assistant
    pub async fn generate_text(&self, question: &str) -> AiResult<TextResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::bad_request("Prompt cannot be empty").into());
        }

        self.run_channel(&prompt::assistant(question), ASSISTANT_FAILURE_MESSAGE)
            .await
    }

    /// Weekly security report
    pub async fn generate_report(&self) -> AiResult<TextResult> {
        self.run_channel(prompt::SECURITY_REPORT, REPORT_FAILURE_MESSAGE)
            .await
    }

    /// Drive a fresh channel through `loading` to `success` or `error`
    async fn run_channel(&self, prompt: &str, failure_message: &str) -> AiResult<TextResult> {
        let backend = self.backend()?;

        let mut channel = TextChannel::idle();
        channel.begin();

        match backend.generate_text(prompt).await {
            Ok(text) => channel.succeed(text),
            Err(e) => {
                tracing::error!(error = %e, "Text generation failed");
                channel.fail(failure_message);
            }
        }
        Ok(channel.snapshot())
    }
}
