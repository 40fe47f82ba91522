//! # Common Error Types
//!
//! Consolidated error handling for the partner admin client.
//!
//! ## Error Categories
//!
//! - **[`AppError`]**: what callers of the Gateway, containers and flows see
//!   - `Api`: a failure already classified by the error classifier (carries the stable code)
//!   - `Decode`: the reply arrived but did not have the expected shape
//!   - `Validation`: a draft was rejected before any request was issued
//!   - `Upload`: the signed-URL binary upload failed
//!   - `State`: an invalid client-side state transition
//!   - `Config`: startup configuration failure
//! - **[`TransportError`]**: raw transport outcome, input to the classifier
//! - **[`IdentityError`]**: failure reported by the external identity provider
//!
//! ## Usage Pattern
//!
//! ```rust
//! use partner_admin::core::error::AppError;
//!
//! fn validate_quantity(quantity: i64) -> Result<i64, AppError> {
//!     if quantity < 0 {
//!         return Err(AppError::Validation("Quantity cannot be negative".to_string()));
//!     }
//!     Ok(quantity)
//! }
//! ```

use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Classified API failure.
    ///
    /// `code` is the stable classifier code (`not-found`, `server-error`,
    /// `auth/invalid-custom-token`, ...); `message` is the localized text
    /// that was also published to the global error banner.
    #[error("API error: {message}")]
    Api { code: String, message: String },

    /// Reply body did not match the expected DTO.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Draft validation failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Signed-URL upload failed.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Invalid client-side state transition.
    #[error("State error: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable classifier code for `Api` errors.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<lib_core::ConfigError> for AppError {
    fn from(err: lib_core::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Raw outcome of a failed HTTP exchange, before classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// No HTTP status: connection refused, DNS, TLS, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but the body was not JSON.
    #[error("HTTP {status}: unreadable body ({reason})")]
    Decode { status: u16, reason: String },
}

impl TransportError {
    /// HTTP status, if the exchange got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Network(_) => None,
            TransportError::Status { status, .. } | TransportError::Decode { status, .. } => {
                Some(*status)
            }
        }
    }
}

/// Failure reported by the identity provider, carrying its own code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Identity provider error [{code}]: {message}")]
pub struct IdentityError {
    pub code: String,
    pub message: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
