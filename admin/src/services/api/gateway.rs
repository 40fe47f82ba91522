//! # Request Gateway
//!
//! Single chokepoint for every call to the partner API. Each verb holds an
//! [`InFlight`](crate::app::state::InFlight) guard for the duration of the
//! exchange, so the global `loading` flag drops on every exit path. Failures
//! are classified once, published to the global banner, and returned as
//! [`AppError::Api`] so the caller still observes them.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::ApiResponse;

use crate::app::state::GlobalState;
use crate::core::error::{AppError, Result};
use crate::core::service::{ApiRequest, Transport};
use crate::services::api::classifier::ErrorClassifier;

/// Per-call query parameters and extra headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Add the parameter only when it has a non-empty value.
    pub fn query_opt(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Authenticated HTTP gateway.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    classifier: ErrorClassifier,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, classifier: ErrorClassifier) -> Self {
        Self {
            transport,
            classifier,
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn state(&self) -> &Arc<GlobalState> {
        self.classifier.state()
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.send(Method::GET, path, None, options).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>, options: RequestOptions) -> Result<Value> {
        self.send(Method::POST, path, body, options).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>, options: RequestOptions) -> Result<Value> {
        self.send(Method::PUT, path, body, options).await
    }

    pub async fn patch(&self, path: &str, body: Option<Value>, options: RequestOptions) -> Result<Value> {
        self.send(Method::PATCH, path, body, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.send(Method::DELETE, path, None, options).await
    }

    /// `GET` and unwrap the `data` field of the reply.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        unwrap_data(self.get(path, options).await?)
    }

    /// `POST` a serializable body and unwrap the `data` field of the reply.
    pub async fn post_data<B, T>(&self, path: &str, body: &B, options: RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        unwrap_data(self.post(path, Some(body), options).await?)
    }

    pub async fn patch_data<B, T>(&self, path: &str, body: &B, options: RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        unwrap_data(self.patch(path, Some(body), options).await?)
    }

    pub async fn delete_data<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        unwrap_data(self.delete(path, options).await?)
    }

    #[tracing::instrument(skip(self, body, options), fields(method = %method, path = %path))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<Value> {
        let _in_flight = self.state().begin_request();
        let start = Instant::now();

        let request = ApiRequest {
            method,
            path: path.trim_start_matches('/').to_string(),
            query: options.query,
            headers: options.headers,
            body,
        };

        match self.transport.execute(request).await {
            Ok(value) => {
                tracing::debug!(duration_ms = start.elapsed().as_millis(), "Request succeeded");
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(
                    status = ?err.status(),
                    duration_ms = start.elapsed().as_millis(),
                    "Request failed"
                );
                Err(self.classifier.fail(err))
            }
        }
    }
}

/// Decode an `{ data, message, timestamp }` reply into its payload.
pub fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T> {
    let envelope: ApiResponse<T> = serde_json::from_value(value)
        .map_err(|e| AppError::Decode(format!("Unexpected reply shape: {e}")))?;
    Ok(envelope.data)
}
