//! Infrastructure Layer

pub mod gemini;

pub use gemini::GeminiBackend;
