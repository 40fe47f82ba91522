//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! - [`Transport`]: the authenticated HTTP exchange behind the Gateway
//! - [`BlobUploader`]: unauthenticated `PUT` to a signed storage URL
//! - [`IdentityProvider`]: custom-token exchange with the external identity provider

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::core::error::{AppError, IdentityError, TransportError};

/// One HTTP exchange against the partner API, relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API root, e.g. `products/p-1`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for the HTTP exchange behind the Gateway
///
/// The real implementation is [`crate::services::http::ReqwestTransport`];
/// tests substitute a scripted transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return the decoded JSON body (`null` when empty).
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

/// Trait for binary uploads to third-party storage
///
/// Implementations must not attach the application bearer token.
#[async_trait]
pub trait BlobUploader: Send + Sync {
    async fn put(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError>;
}

/// Trait for the identity provider custom-token exchange
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a backend-minted custom token for a provider ID token.
    async fn exchange_custom_token(&self, custom_token: &str) -> Result<String, IdentityError>;
}
