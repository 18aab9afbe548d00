//! # Codec Configuration
//!
//! Decode limits that bound the work done on untrusted input. Values are
//! serde-friendly so deployments can tune them from a TOML file or the
//! environment (see the `ucs03-config` crate); the defaults are safe for
//! relayers decoding arbitrary on-chain data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum instruction nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default maximum number of instructions in one batch
pub const DEFAULT_MAX_BATCH_LEN: usize = 1024;

/// Top-level codec configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub limits: DecodeLimits,
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}

/// Bounds applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum instruction nesting; the top-level instruction is depth 1
    pub max_depth: usize,

    /// Maximum number of instructions in a single batch
    pub max_batch_len: usize,
}

impl DecodeLimits {
    pub const DEFAULT: DecodeLimits = DecodeLimits {
        max_depth: DEFAULT_MAX_DEPTH,
        max_batch_len: DEFAULT_MAX_BATCH_LEN,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::BelowMinimum {
                field: "limits.max_depth",
                min: 1,
                value: self.max_depth,
            });
        }
        if self.max_batch_len == 0 {
            return Err(ConfigError::BelowMinimum {
                field: "limits.max_batch_len",
                min: 1,
                value: self.max_batch_len,
            });
        }
        Ok(())
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Invalid configuration values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: usize,
        value: usize,
    },
}
