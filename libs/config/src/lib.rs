//! # UCS03 Tool Configuration
//!
//! Layered configuration for the UCS03 tools: built-in defaults, an optional
//! TOML file and `UCS03_` environment overrides, resolved into the codec's
//! [`DecodeLimits`](ucs03_codec::DecodeLimits) plus a logging filter.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use ucs03_config::load_config;
//!
//! let config = load_config(Some(Path::new("ucs03.toml"))).unwrap();
//! let limits = config.limits;
//! ```

pub mod service_config;

// Re-export commonly used types
pub use service_config::{load_config, Ucs03Config, DEFAULT_LOG_LEVEL, ENV_PREFIX};
