//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Error types (`AppError`, `TransportError`, `IdentityError`, `Result<T>`)
//! - **[`service`]**: Service traits (`Transport`, `BlobUploader`, `IdentityProvider`)
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use partner_admin::core::service::Transport;
//!
//! // In production: reqwest-backed transport
//! let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config, credentials)?);
//!
//! // In tests: scripted replies
//! let transport: Arc<dyn Transport> = Arc::new(MockTransport::new());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, IdentityError, Result, TransportError};
pub use service::{ApiRequest, BlobUploader, IdentityProvider, Transport};
