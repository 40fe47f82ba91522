//! # Application Root
//!
//! [`App`] wires the Gateway, the Context Provider and the eight entity
//! containers together. It holds no view code: a front end subscribes to
//! the containers and to [`GlobalState`], and drives dialogs through the
//! [`flows`].
//!
//! ```text
//!   route URL ─┐                      ┌─► EntityContainer<Stores>
//!              ├─► ContextProvider ───┼─► EntityContainer<Products>
//!   token ─────┘     (watch<Scope>)   └─► ... (one Binding each)
//!                                              │
//!                                              ▼
//!                                  Gateway ─► Transport ─► REST API
//!                                     │
//!                                     └─► ErrorClassifier ─► GlobalState
//! ```
//!
//! ## Modules
//!
//! - [`state`]: global `loading` / `error` flags
//! - [`container`]: generic reactive list of one entity type
//! - [`collections`]: the eight container instantiations and their lookups
//! - [`context`]: current partner/store/product/variant scope
//! - [`dialog`], [`page`]: dialog results and how pages apply them
//! - [`flows`]: mutation sequences behind the dialogs

pub mod collections;
pub mod container;
pub mod context;
pub mod dialog;
pub mod flows;
pub mod page;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use lib_core::Config;
use tokio::sync::watch;

use crate::core::error::Result;
use crate::core::service::{BlobUploader, IdentityProvider, Transport};
use crate::services::api::{ErrorClassifier, Gateway};
use crate::services::http::{BareUploader, Credentials, ReqwestTransport};
use crate::services::identity::FirebaseIdentity;

use collections::{Heroes, Images, Inventories, ProductPrices, Products, Stores, VariantPrices, Variants};
use container::{EntityContainer, Paging};
use context::{Binding, ContextProvider};
use flows::{AdminAuth, ImageUploader};
use state::{GlobalState, GlobalStatus};

/// Composition root of the admin client.
pub struct App {
    pub state: Arc<GlobalState>,
    pub context: Arc<ContextProvider>,
    pub gateway: Gateway,
    pub credentials: Credentials,

    pub stores: EntityContainer<Stores>,
    pub products: EntityContainer<Products>,
    pub variants: EntityContainer<Variants>,
    pub inventory: EntityContainer<Inventories>,
    pub product_prices: EntityContainer<ProductPrices>,
    pub variant_prices: EntityContainer<VariantPrices>,
    pub images: EntityContainer<Images>,
    pub heroes: EntityContainer<Heroes>,

    identity: Arc<dyn IdentityProvider>,
    blobs: Arc<dyn BlobUploader>,
    bindings: Vec<Binding>,
}

impl App {
    /// Build the production stack from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = Credentials::new();
        let transport = ReqwestTransport::new(config, credentials.clone())?;
        let uploader = BareUploader::new(Duration::from_secs(config.request_timeout_secs))?;
        let identity = FirebaseIdentity::new(config)?;

        Ok(Self::with_services(
            config,
            credentials,
            Arc::new(transport),
            Arc::new(uploader),
            Arc::new(identity),
        ))
    }

    /// Build around caller-supplied services.
    ///
    /// `credentials` must be the same handle the transport reads from.
    pub fn with_services(
        config: &Config,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
        blobs: Arc<dyn BlobUploader>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let state = Arc::new(GlobalState::new(Duration::from_secs(config.error_dismiss_secs)));
        let classifier = ErrorClassifier::new(Arc::clone(&state), config.locale);
        let gateway = Gateway::new(transport, classifier);
        let paging = Paging::from_config(config);

        tracing::info!(
            api_root = %config.api_root(),
            page_size = paging.size,
            locale = ?config.locale,
            "Admin client ready"
        );

        Self {
            state,
            context: Arc::new(ContextProvider::new()),
            credentials,
            stores: EntityContainer::new(gateway.clone(), paging.clone()),
            products: EntityContainer::new(gateway.clone(), paging.clone()),
            variants: EntityContainer::new(gateway.clone(), paging.clone()),
            inventory: EntityContainer::new(gateway.clone(), paging.clone()),
            product_prices: EntityContainer::new(gateway.clone(), paging.clone()),
            variant_prices: EntityContainer::new(gateway.clone(), paging.clone()),
            images: EntityContainer::new(gateway.clone(), paging.clone()),
            heroes: EntityContainer::new(gateway.clone(), paging),
            gateway,
            identity,
            blobs,
            bindings: Vec::new(),
        }
    }

    /// Bind every container to the context. Replaces existing bindings.
    pub fn bind_all(&mut self) {
        self.unbind_all();
        self.bindings = vec![
            self.context.bind(self.stores.clone()),
            self.context.bind(self.products.clone()),
            self.context.bind(self.variants.clone()),
            self.context.bind(self.inventory.clone()),
            self.context.bind(self.product_prices.clone()),
            self.context.bind(self.variant_prices.clone()),
            self.context.bind(self.images.clone()),
            self.context.bind(self.heroes.clone()),
        ];
        tracing::debug!(count = self.bindings.len(), "Containers bound to context");
    }

    pub fn unbind_all(&mut self) {
        for binding in self.bindings.drain(..) {
            binding.unbind();
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn auth(&self) -> AdminAuth {
        AdminAuth::new(
            self.gateway.clone(),
            Arc::clone(&self.identity),
            self.credentials.clone(),
            Arc::clone(&self.context),
        )
    }

    pub fn image_uploader(&self) -> ImageUploader {
        ImageUploader::new(self.gateway.clone(), Arc::clone(&self.blobs), self.images.clone())
    }

    pub fn status(&self) -> GlobalStatus {
        self.state.snapshot()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<GlobalStatus> {
        self.state.subscribe()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unbind_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockIdentity, MockTransport, MockUploader};
    use serde_json::json;

    fn app(transport: &MockTransport) -> App {
        let config = Config {
            page_size: 25,
            ..Config::default()
        };
        App::with_services(
            &config,
            Credentials::new(),
            Arc::new(transport.clone()),
            Arc::new(MockUploader::new()),
            Arc::new(MockIdentity::succeeding("id-token")),
        )
    }

    #[tokio::test]
    async fn test_navigation_loads_bound_containers() {
        let transport = MockTransport::new();
        let mut app = app(&transport);
        app.bind_all();
        // No partner yet: nothing issued
        assert_eq!(transport.call_count(), 0);

        // partner only: stores, products, inventory, images
        for _ in 0..4 {
            transport.reply(json!({ "data": [] }));
        }
        app.context.on_navigation("/partners/p-1/stores");
        transport.wait_for_calls(4).await;

        let mut paths: Vec<_> = transport.calls().into_iter().map(|c| c.path).collect();
        paths.sort();
        assert_eq!(paths, vec!["images", "inventory", "products", "stores"]);
        assert!(transport
            .calls()
            .iter()
            .all(|c| c.query_value("size") == Some("25") && c.query_value("partnerId") == Some("p-1")));
    }

    #[tokio::test]
    async fn test_unbind_stops_reloads() {
        let transport = MockTransport::new();
        let mut app = app(&transport);
        app.bind_all();
        assert_eq!(app.bindings().len(), 8);
        assert!(app.bindings().iter().all(|b| b.is_active()));

        app.unbind_all();
        assert!(app.bindings().is_empty());

        app.context.set_partner_id(Some("p-1".into()));
        tokio::task::yield_now().await;
        assert_eq!(transport.call_count(), 0);
        assert_eq!(app.status(), GlobalStatus::default());
    }

    #[test]
    fn test_auth_shares_credentials() {
        let transport = MockTransport::new();
        let app = app(&transport);
        let token = format!(
            "{}.{}.sig",
            lib_utils::b64u_encode(r#"{"alg":"none"}"#),
            lib_utils::b64u_encode(r#"{"partnerId":"p-9"}"#)
        );

        app.auth().restore(&token).unwrap();
        assert_eq!(app.credentials.token(), Some(token));
        assert_eq!(app.context.partner_id().as_deref(), Some("p-9"));
    }
}
