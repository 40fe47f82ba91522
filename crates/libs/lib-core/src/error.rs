//! # Configuration Errors

use thiserror::Error;

/// Convenience type alias for `Result<T, ConfigError>`.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("{name} has an invalid value: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// Parsed values violate a configuration rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config has already been initialized")]
    AlreadyInitialized,
}
