//! AI Gateway Backend Module
//!
//! Thin facade over a generative image/text API:
//! - `domain/` - Aspect ratios, prompt templates, text channels, backend port
//! - `application/` - `AiGateway` and its config
//! - `infra/` - Gemini / Imagen REST adapter (reqwest)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! A missing API key never stops the server: the gateway is built
//! unconfigured, covers fall back to a placeholder URL and every other
//! operation reports `Unconfigured`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AiConfig, AiGateway};
pub use domain::GenerativeBackend;
pub use error::{AiError, AiResult};
pub use infra::GeminiBackend;
pub use presentation::router::ai_router_generic;
