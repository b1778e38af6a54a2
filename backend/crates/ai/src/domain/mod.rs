//! Domain Layer
//!
//! Image and text vocabulary of the AI gateway, plus the backend port.

pub mod backend;
pub mod image;
pub mod prompt;
pub mod text;

pub use backend::GenerativeBackend;
pub use image::{AspectRatio, GeneratedImage, ImageRequest};
pub use text::{TextChannel, TextResult, TextState};
