//! Reqwest-backed Gemini / Imagen adapter
//!
//! Owns transport details only: request bodies, the API key header, HTTP
//! error mapping and response decoding.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::config::AiConfig;
use crate::domain::backend::GenerativeBackend;
use crate::domain::image::{GeneratedImage, ImageRequest};
use crate::error::{AiError, AiResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Upstream error bodies are truncated to this many characters in logs
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    image_model: String,
    text_model: String,
}

impl GeminiBackend {
    /// `Ok(None)` when the config has no usable API key
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn from_config(config: &AiConfig) -> AiResult<Option<Self>> {
        let Some(api_key) = config.usable_api_key() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Internal(format!("HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            image_model: config.image_model.clone(),
            text_model: config.text_model.clone(),
        }))
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    async fn post<Req, Resp>(&self, url: String, body: &Req) -> AiResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| AiError::Upstream(format!("invalid response payload: {e}")))
    }
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("text_model", &self.text_model)
            .finish_non_exhaustive()
    }
}

impl GenerativeBackend for GeminiBackend {
    async fn generate_image(&self, request: &ImageRequest) -> AiResult<GeneratedImage> {
        let body = PredictRequest::for_image(request);
        let response: PredictResponse = self
            .post(self.endpoint(&self.image_model, "predict"), &body)
            .await?;
        response.into_image()
    }

    async fn generate_text(&self, prompt: &str) -> AiResult<String> {
        let body = GenerateContentRequest::for_prompt(prompt);
        let response: GenerateContentResponse = self
            .post(self.endpoint(&self.text_model, "generateContent"), &body)
            .await?;
        response.into_text()
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AiError {
    let text = String::from_utf8_lossy(body);
    let snippet: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    AiError::Upstream(format!("status {status}: {snippet}"))
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictRequest<'a> {
    instances: [PredictInstance<'a>; 1],
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u8,
    aspect_ratio: &'static str,
    output_options: OutputOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions<'a> {
    mime_type: &'a str,
}

impl<'a> PredictRequest<'a> {
    fn for_image(request: &'a ImageRequest) -> Self {
        Self {
            instances: [PredictInstance {
                prompt: &request.prompt,
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: request.aspect_ratio.as_str(),
                output_options: OutputOptions {
                    mime_type: GeneratedImage::DEFAULT_MIME_TYPE,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl PredictResponse {
    fn into_image(self) -> AiResult<GeneratedImage> {
        self.predictions
            .into_iter()
            .find_map(|p| {
                p.bytes_base64_encoded.map(|data| GeneratedImage {
                    mime_type: p
                        .mime_type
                        .unwrap_or_else(|| GeneratedImage::DEFAULT_MIME_TYPE.to_owned()),
                    base64_data: data,
                })
            })
            .ok_or_else(|| AiError::Upstream("no image in response".into()))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn for_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> AiResult<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::Upstream("empty text response".into()));
        }
        Ok(text)
    }
}
