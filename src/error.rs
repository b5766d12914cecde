//! Error types for the screen layer

use thiserror::Error;

/// Errors raised while saving or restoring the screen stack
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown screen kind: {0}")]
    UnknownScreen(String),

    #[error("Corrupted screen state: {0}")]
    CorruptedData(String),

    #[error("Content error while restoring: {0}")]
    Content(#[from] ContentError),
}

/// Errors raised while loading textures and other content
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{asset}': {reason}")]
    Load { asset: String, reason: String },
}

/// Errors raised by the screen registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Screen kind '{0}' already registered")]
    Duplicate(String),
}

/// Errors raised while reading the game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
