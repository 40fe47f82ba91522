//! Scripted service doubles shared by the unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lib_core::Locale;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{oneshot, watch};

use crate::app::state::GlobalState;
use crate::core::error::{AppError, IdentityError, TransportError};
use crate::core::service::{ApiRequest, BlobUploader, IdentityProvider, Transport};
use crate::services::api::{ErrorClassifier, Gateway};

enum Scripted {
    Ready(Result<Value, TransportError>),
    Gated(oneshot::Receiver<Result<Value, TransportError>>),
}

struct TransportInner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<ApiRequest>>,
    count: watch::Sender<usize>,
}

/// Transport that answers requests from a FIFO script.
///
/// An exhausted script answers with a network error.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<TransportInner>,
}

impl MockTransport {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            inner: Arc::new(TransportInner {
                script: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
                count,
            }),
        }
    }

    pub fn reply(&self, body: Value) {
        self.inner.script.lock().push_back(Scripted::Ready(Ok(body)));
    }

    pub fn fail(&self, err: TransportError) {
        self.inner.script.lock().push_back(Scripted::Ready(Err(err)));
    }

    /// Queue a reply that is held until the returned sender fires.
    pub fn gated(&self) -> oneshot::Sender<Result<Value, TransportError>> {
        let (sender, receiver) = oneshot::channel();
        self.inner.script.lock().push_back(Scripted::Gated(receiver));
        sender
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.inner.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        *self.inner.count.borrow()
    }

    pub async fn wait_for_calls(&self, n: usize) {
        let mut count = self.inner.count.subscribe();
        tokio::time::timeout(Duration::from_secs(5), count.wait_for(|c| *c >= n))
            .await
            .expect("timed out waiting for transport calls")
            .expect("transport dropped");
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let next = self.inner.script.lock().pop_front();
        self.inner.calls.lock().push(request);
        self.inner.count.send_modify(|c| *c += 1);

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_string()))),
            None => Err(TransportError::Network("no scripted reply".to_string())),
        }
    }
}

/// Blob uploader recording every `PUT`.
#[derive(Clone, Default)]
pub struct MockUploader {
    puts: Arc<Mutex<Vec<(String, Vec<u8>, String)>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_url(&self, url: &str) {
        self.failing.lock().insert(url.to_string());
    }

    /// `(url, bytes, content_type)` per successful upload.
    pub fn puts(&self) -> Vec<(String, Vec<u8>, String)> {
        self.puts.lock().clone()
    }
}

#[async_trait]
impl BlobUploader for MockUploader {
    async fn put(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        if self.failing.lock().contains(url) {
            return Err(AppError::Upload("storage rejected the upload".to_string()));
        }
        self.puts
            .lock()
            .push((url.to_string(), bytes, content_type.to_string()));
        Ok(())
    }
}

/// Identity provider with one scripted outcome.
#[derive(Clone)]
pub struct MockIdentity {
    outcome: Result<String, IdentityError>,
    exchanged: Arc<Mutex<Vec<String>>>,
}

impl MockIdentity {
    pub fn succeeding(id_token: &str) -> Self {
        Self {
            outcome: Ok(id_token.to_string()),
            exchanged: Arc::default(),
        }
    }

    pub fn failing(err: IdentityError) -> Self {
        Self {
            outcome: Err(err),
            exchanged: Arc::default(),
        }
    }

    pub fn exchanged(&self) -> Vec<String> {
        self.exchanged.lock().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn exchange_custom_token(&self, custom_token: &str) -> Result<String, IdentityError> {
        self.exchanged.lock().push(custom_token.to_string());
        self.outcome.clone()
    }
}

/// Gateway over `transport` with a fresh global state.
pub fn gateway_with(transport: &MockTransport) -> Gateway {
    let state = Arc::new(GlobalState::new(Duration::from_secs(3)));
    Gateway::new(Arc::new(transport.clone()), ErrorClassifier::new(state, Locale::En))
}
