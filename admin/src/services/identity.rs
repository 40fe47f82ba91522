//! # Identity Provider
//!
//! Custom-token exchange against the Firebase Auth REST API.

use std::time::Duration;

use async_trait::async_trait;
use lib_core::Config;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::core::error::{AppError, IdentityError};
use crate::core::service::IdentityProvider;

const SIGN_IN_WITH_CUSTOM_TOKEN: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithCustomToken";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInReply {
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a provider error message to its client error code.
pub fn provider_code(message: &str) -> &'static str {
    // Messages look like `INVALID_CUSTOM_TOKEN` or `TOO_MANY_ATTEMPTS_TRY_LATER : detail`
    let head = message.split(':').next().unwrap_or_default().trim();
    match head {
        "INVALID_CUSTOM_TOKEN" => "auth/invalid-custom-token",
        "CREDENTIAL_MISMATCH" => "auth/custom-token-mismatch",
        "USER_DISABLED" => "auth/user-disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
        "EMAIL_EXISTS" => "auth/email-already-in-use",
        h if h.starts_with("API key not valid") || h == "INVALID_API_KEY" => "auth/invalid-api-key",
        _ => "auth/internal-error",
    }
}

/// Firebase-backed [`IdentityProvider`].
#[derive(Debug, Clone)]
pub struct FirebaseIdentity {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl FirebaseIdentity {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build identity client: {e}")))?;
        Ok(Self {
            client,
            api_key: config.identity_api_key.clone(),
            endpoint: SIGN_IN_WITH_CUSTOM_TOKEN.to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    #[tracing::instrument(skip_all)]
    async fn exchange_custom_token(&self, custom_token: &str) -> Result<String, IdentityError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| IdentityError::new("auth/invalid-api-key", "IDENTITY_API_KEY is not set"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&json!({ "token": custom_token, "returnSecureToken": true }))
            .send()
            .await
            .map_err(|e| IdentityError::new("auth/network-request-failed", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::new("auth/network-request-failed", e.to_string()))?;

        if status.is_success() {
            let reply: SignInReply = serde_json::from_str(&body)
                .map_err(|e| IdentityError::new("auth/internal-error", e.to_string()))?;
            tracing::info!("Custom token exchanged");
            return Ok(reply.id_token);
        }

        let message = serde_json::from_str::<ErrorReply>(&body)
            .map(|reply| reply.error.message)
            .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
        tracing::warn!(status = status.as_u16(), message = %message, "Custom token exchange rejected");
        Err(IdentityError::new(provider_code(&message), message))
    }
}
