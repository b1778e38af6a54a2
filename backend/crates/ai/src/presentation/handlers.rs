//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::application::gateway::AiGateway;
use crate::domain::backend::GenerativeBackend;
use crate::domain::image::AspectRatio;
use crate::error::AiResult;
use crate::presentation::dto::{
    AskRequest, ContentBody, GenerateImageRequest, ImageResponse, TextResponse,
};

/// POST /ai/generate-image
pub async fn generate_image<B>(
    State(gateway): State<Arc<AiGateway<B>>>,
    Json(req): Json<GenerateImageRequest>,
) -> AiResult<Json<ImageResponse>>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    let aspect_ratio = req.aspect_ratio.parse::<AspectRatio>()?;
    let image_data = gateway.generate_image(&req.prompt, aspect_ratio).await?;
    Ok(Json(ImageResponse { image_data }))
}

/// POST /ai/ask
pub async fn ask<B>(
    State(gateway): State<Arc<AiGateway<B>>>,
    Json(req): Json<AskRequest>,
) -> AiResult<Json<TextResponse>>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    Ok(Json(gateway.generate_text(&req.prompt).await?.into()))
}

/// POST /ai/report
pub async fn report<B>(State(gateway): State<Arc<AiGateway<B>>>) -> AiResult<Json<TextResponse>>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    Ok(Json(gateway.generate_report().await?.into()))
}

/// POST /ai/render-content
pub async fn render_content<B>(
    State(gateway): State<Arc<AiGateway<B>>>,
    Json(req): Json<ContentBody>,
) -> Json<ContentBody>
where
    B: GenerativeBackend + Send + Sync + 'static,
{
    Json(ContentBody {
        content: gateway.render_inline_images(&req.content).await,
    })
}
