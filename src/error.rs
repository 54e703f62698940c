//! Error types for chainbook

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("block not found at index {0}")]
    BlockNotFound(u64),
    #[error("invalid {expected}: '{input}'")]
    MalformedValue {
        expected: &'static str,
        input: String,
    },
    #[error("text payload is {length} characters, maximum is {max}")]
    TextTooLong { length: usize, max: usize },
    #[error("block {index} hash does not match its contents")]
    HashMismatch { index: u64 },
    #[error("block {index} does not link to its predecessor's hash")]
    BrokenLink { index: u64 },
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Serialization(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
