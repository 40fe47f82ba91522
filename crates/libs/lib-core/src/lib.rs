//! # Core Library
//!
//! Process-wide configuration for the partner admin client.
//!
//! - [`config`]: `Config` loaded from the environment, validated once at startup
//! - [`error`]: `ConfigError`

pub mod config;
pub mod error;

pub use config::{core_config, init_config, Config, Locale};
pub use error::{ConfigError, Result};
