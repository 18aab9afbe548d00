//! Tool Configuration Module
//!
//! Loads the codec limits and logging defaults for UCS03 tooling.
//! Sources are layered, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `UCS03_` environment variables, `__` between nested keys
//!    (`UCS03_LIMITS__MAX_DEPTH=8`)

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use ucs03_codec::config::{CodecConfig, DecodeLimits, DEFAULT_MAX_BATCH_LEN, DEFAULT_MAX_DEPTH};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "UCS03";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Default tracing filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Effective configuration of the UCS03 tools
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Ucs03Config {
    /// Decode limits applied to untrusted input
    pub limits: DecodeLimits,

    /// Tracing filter directive (`info`, `ucs03_codec=trace`, ...)
    pub log_level: String,
}

impl Default for Ucs03Config {
    fn default() -> Self {
        Self {
            limits: DecodeLimits::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Ucs03Config {
    /// Load configuration, reading `path` when given, with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            path,
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("limits.max_depth", DEFAULT_MAX_DEPTH as u64)?
            .set_default("limits.max_batch_len", DEFAULT_MAX_BATCH_LEN as u64)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = path {
            info!("Loading config file: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(environment);

        let config: Ucs03Config = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config
            .codec()
            .validate()
            .context("Invalid codec limits")?;

        debug!(
            max_depth = config.limits.max_depth,
            max_batch_len = config.limits.max_batch_len,
            log_level = %config.log_level,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Codec view of this configuration
    pub fn codec(&self) -> CodecConfig {
        CodecConfig {
            limits: self.limits,
        }
    }

    /// Render as TOML, the same format [`Ucs03Config::load`] reads
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<Ucs03Config> {
    Ucs03Config::load(path)
}
