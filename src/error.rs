//! Error types for the schema bridge

use thiserror::Error;

use crate::wire::{DecodeError, EncodeError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Convert {entity} failed at index {index}")]
    ElementUnavailable { entity: &'static str, index: usize },
    #[error("Convert {entity} failed at index {index}: {source}")]
    Element {
        entity: &'static str,
        index: usize,
        #[source]
        source: Box<BridgeError>,
    },
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, BridgeError>;
