//! # Admin Sign-Up Flow
//!
//! ```text
//! validate ──► POST auth/sign-up ──► identity provider exchange ──► POST auth/admin/register
//!          └─► bearer token stored in Credentials and applied to the context
//! ```
//!
//! Identity provider failures carry their own code and go through the same
//! classifier as Gateway failures, so the banner shows the localized text.

use std::sync::Arc;

use lib_auth::Claims;
use shared::SignUpRequest;

use crate::app::context::ContextProvider;
use crate::core::error::Result;
use crate::core::service::IdentityProvider;
use crate::services::api::{self, Gateway};
use crate::services::http::Credentials;
use crate::utils::validation::{validate_email, validate_password};

/// A completed sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub token: String,
    /// `None` when the token payload could not be read
    pub claims: Option<Claims>,
}

#[derive(Clone)]
pub struct AdminAuth {
    gateway: Gateway,
    identity: Arc<dyn IdentityProvider>,
    credentials: Credentials,
    context: Arc<ContextProvider>,
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field("signed_in", &self.credentials.is_signed_in())
            .finish_non_exhaustive()
    }
}

impl AdminAuth {
    pub fn new(
        gateway: Gateway,
        identity: Arc<dyn IdentityProvider>,
        credentials: Credentials,
        context: Arc<ContextProvider>,
    ) -> Self {
        Self {
            gateway,
            identity,
            credentials,
            context,
        }
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignedIn> {
        validate_email(request.email.trim()).into_result()?;
        validate_password(&request.password).into_result()?;

        let custom = api::auth::sign_up(&self.gateway, request).await?;
        let id_token = self
            .identity
            .exchange_custom_token(&custom.custom_token)
            .await
            .map_err(|err| self.gateway.classifier().fail(err))?;
        let admin = api::auth::register_admin(&self.gateway, &id_token).await?;

        self.credentials.set(admin.token.clone());
        let claims = match self.context.apply_token(&admin.token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::warn!(error = %err, "Admin token payload unreadable");
                None
            }
        };

        tracing::info!(partner_id = ?claims.as_ref().and_then(|c| c.partner_id.as_deref()), "Admin signed up");
        Ok(SignedIn {
            token: admin.token,
            claims,
        })
    }

    /// Adopt an existing bearer token (e.g. from the environment).
    pub fn restore(&self, token: &str) -> Result<Claims> {
        let claims = self
            .context
            .apply_token(token)
            .map_err(|e| crate::core::error::AppError::Validation(e.to_string()))?;
        self.credentials.set(token);
        Ok(claims)
    }

    pub fn sign_out(&self) {
        self.credentials.clear();
        self.context.clear_token();
        tracing::info!("Signed out");
    }

    pub fn is_signed_in(&self) -> bool {
        self.credentials.is_signed_in()
    }
}
