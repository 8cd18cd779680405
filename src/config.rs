//! Configuration management for the schema bridge

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{BridgeError, Result};
use crate::wire::{DecodeContext, DEFAULT_RECURSION_LIMIT};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub codec: CodecLimits,
}

/// Bounds applied to every conversion a bridge performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CodecLimits {
    /// Largest wire buffer a conversion may produce, in bytes. Unbounded
    /// unless configured.
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
    /// Deepest nesting of embedded messages accepted on decode.
    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: u32,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
            recursion_limit: default_recursion_limit(),
        }
    }
}

impl CodecLimits {
    pub fn decode_context(&self) -> DecodeContext {
        DecodeContext::with_recursion_limit(self.recursion_limit)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_message_size == 0 {
            return Err(BridgeError::Config(
                "codec.max_message_size must be greater than zero".to_string(),
            ));
        }
        if self.recursion_limit == 0 {
            return Err(BridgeError::Config(
                "codec.recursion_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_max_message_size() -> usize {
    usize::MAX
}

fn default_recursion_limit() -> u32 {
    DEFAULT_RECURSION_LIMIT
}

/// Loads bridge settings from a TOML file.
///
/// A missing or empty file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig> {
    let config_str = match fs::read_to_string(path.as_ref()) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let config: BridgeConfig = if config_str.trim().is_empty() {
        BridgeConfig::default()
    } else {
        toml::from_str(&config_str)?
    };

    config.codec.validate()?;
    Ok(config)
}
