//! # Authentication Endpoints
//!
//! Admin sign-up: the backend mints a custom token, the identity provider
//! exchanges it for an ID token, and the backend trades that for the
//! application bearer token.

use shared::{AdminTokenResponse, CustomTokenResponse, SignUpRequest};

use super::gateway::{Gateway, RequestOptions};
use crate::core::error::Result;

/// `POST auth/sign-up`
#[tracing::instrument(skip(gateway, request), fields(email = %request.email))]
pub async fn sign_up(gateway: &Gateway, request: &SignUpRequest) -> Result<CustomTokenResponse> {
    tracing::info!("Requesting admin sign-up");
    gateway.post_data("auth/sign-up", request, RequestOptions::new()).await
}

/// `POST auth/admin/register?firebaseToken=`
#[tracing::instrument(skip_all)]
pub async fn register_admin(gateway: &Gateway, id_token: &str) -> Result<AdminTokenResponse> {
    let options = RequestOptions::new().query("firebaseToken", id_token);
    let value = gateway.post("auth/admin/register", None, options).await?;
    super::gateway::unwrap_data(value)
}
