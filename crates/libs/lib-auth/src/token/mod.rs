//! # Bearer Token Claims
//!
//! The admin client never holds the signing key, so it cannot (and does not
//! try to) verify tokens. It only reads the payload segment to learn which
//! partner and store the session belongs to. Verification stays with the
//! backend, which rejects forged tokens on every request.

use lib_utils::{b64u_decode_to_string, now_utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims the partner API puts in its bearer tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (admin user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// A token without `exp` never expires client-side.
    pub fn is_expired(&self) -> bool {
        self.exp
            .map(|exp| exp <= now_utc().timestamp())
            .unwrap_or(false)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: expected three dot-separated segments")]
    Malformed,

    #[error("Token payload is not valid base64url")]
    Encoding,

    #[error("Token payload is not valid claims JSON: {0}")]
    Payload(String),
}

/// Decode the claims of a compact JWT without verifying its signature.
///
/// Accepts the raw token or an `Authorization` header value (`Bearer ...`).
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().take(2).any(|s| s.is_empty()) {
        return Err(TokenError::Malformed);
    }

    let payload = b64u_decode_to_string(segments[1]).map_err(|_| TokenError::Encoding)?;
    serde_json::from_str(&payload).map_err(|e| TokenError::Payload(e.to_string()))
}
