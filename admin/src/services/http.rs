//! # HTTP Transport
//!
//! reqwest-backed implementations of the service traits.
//!
//! - [`ReqwestTransport`]: authenticated calls to the partner API
//! - [`BareUploader`]: signed-URL uploads with a client that never sees the
//!   bearer token
//! - [`Credentials`]: the bearer token shared between the transport and the
//!   sign-up flow

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lib_core::Config;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::core::error::{AppError, TransportError};
use crate::core::service::{ApiRequest, BlobUploader, Transport};

/// Deployment workaround header sent with every API call when enabled.
pub const BROWSER_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

/// Current bearer token. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<String>>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.read().is_some()
    }
}

/// Transport for the partner API.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    api_root: String,
    credentials: Credentials,
}

impl ReqwestTransport {
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        if config.skip_browser_warning {
            headers.insert(BROWSER_WARNING_HEADER, HeaderValue::from_static("true"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_root: config.api_root(),
            credentials,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Request-transform step: bearer token first, then per-call headers.
    fn prepare(&self, request: &ApiRequest) -> RequestBuilder {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url_for(&request.path))
            .query(&request.query);

        if let Some(token) = self.credentials.token() {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let response = self.prepare(&request).send().await.map_err(|e| {
            tracing::error!(error = %e, path = %request.path, "Network error");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_body(status.as_u16(), &body)
    }
}

/// Decode a success body; an empty body is `null`.
fn parse_body(status: u16, body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| TransportError::Decode {
        status,
        reason: e.to_string(),
    })
}

/// Unauthenticated client for signed storage URLs.
#[derive(Debug, Clone)]
pub struct BareUploader {
    client: Client,
}

impl BareUploader {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build upload client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BlobUploader for BareUploader {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Signed upload rejected");
            return Err(AppError::Upload(format!("Storage returned {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn transport(credentials: Credentials) -> ReqwestTransport {
        let config = Config {
            api_base_url: "https://api.example.com/".to_string(),
            api_domain: "/api/v1/".to_string(),
            ..Default::default()
        };
        ReqwestTransport::new(&config, credentials).unwrap()
    }

    #[test]
    fn test_url_join() {
        let transport = transport(Credentials::new());
        assert_eq!(transport.url_for("/stores"), "https://api.example.com/api/v1/stores");
    }

    #[test]
    fn test_request_transform_attaches_bearer_and_headers() {
        let credentials = Credentials::new();
        credentials.set("tok-1");
        let transport = transport(credentials.clone());

        let mut request = ApiRequest::new(Method::GET, "stores");
        request.query.push(("partnerId".into(), "p-1".into()));
        request.headers.push(("x-trace".into(), "abc".into()));

        let built = transport.prepare(&request).build().unwrap();
        assert_eq!(built.url().as_str(), "https://api.example.com/api/v1/stores?partnerId=p-1");
        assert_eq!(built.headers()["authorization"], "Bearer tok-1");
        assert_eq!(built.headers()["x-trace"], "abc");

        credentials.clear();
        let built = transport.prepare(&request).build().unwrap();
        assert!(built.headers().get("authorization").is_none());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(204, "  ").unwrap(), Value::Null);
        assert_eq!(parse_body(200, r#"{"data":true}"#).unwrap()["data"], true);
        assert!(matches!(
            parse_body(200, "<html>"),
            Err(TransportError::Decode { status: 200, .. })
        ));
    }
}
