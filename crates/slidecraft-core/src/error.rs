//! Error types for SlideCraft

use thiserror::Error;

/// The main error type for SlideCraft operations
#[derive(Debug, Error)]
pub enum SlideCraftError {
    #[error("Provider {0} not found")]
    ProviderNotFound(String),

    #[error("All providers failed to generate content")]
    AllProvidersFailed,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for SlideCraft operations
pub type Result<T> = std::result::Result<T, SlideCraftError>;

impl From<toml::de::Error> for SlideCraftError {
    fn from(err: toml::de::Error) -> Self {
        SlideCraftError::TomlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for SlideCraftError {
    fn from(err: serde_json::Error) -> Self {
        SlideCraftError::JsonError(err.to_string())
    }
}
