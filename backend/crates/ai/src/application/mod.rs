//! Application Layer

pub mod config;
pub mod gateway;

// Re-exports
pub use config::AiConfig;
pub use gateway::AiGateway;
