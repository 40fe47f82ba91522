//! # Entity State Container
//!
//! One generic container per entity type: an owned `items / loading / error`
//! state behind a `watch` channel, a fire-and-forget `load`, and a local
//! `remove`. Entity types plug in through [`Collection`].
//!
//! ## Load lifecycle
//!
//! ```text
//! begin_load(scope)
//!   ├─ required key missing → items = [], loading = false, error = None (no request)
//!   └─ otherwise            → loading = true, error = None → PendingLoad
//! PendingLoad::run()
//!   ├─ Ok  → items = prepared rows, error = None
//!   └─ Err → items = [], error = C::LOAD_ERROR
//!   loading = false (also on drop, if the load never settled)
//! ```
//!
//! Every `begin_load` takes a new generation number. A settle carrying an
//! older generation is discarded, so the latest issued load always wins.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lib_core::Config;
use serde::de::DeserializeOwned;
use shared::ListPayload;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::error::Result;
use crate::debug::spawn_tracked;
use crate::services::api::{Gateway, RequestOptions};

/// Context identifiers a collection can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    Partner,
    Store,
    Product,
    Variant,
}

impl ScopeKey {
    pub const ALL: [ScopeKey; 4] = [
        ScopeKey::Partner,
        ScopeKey::Store,
        ScopeKey::Product,
        ScopeKey::Variant,
    ];

    /// Query parameter name on the wire.
    pub fn param(self) -> &'static str {
        match self {
            ScopeKey::Partner => "partnerId",
            ScopeKey::Store => "storeId",
            ScopeKey::Product => "productId",
            ScopeKey::Variant => "variantId",
        }
    }
}

/// Identifiers a load is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub partner_id: Option<String>,
    pub store_id: Option<String>,
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
}

impl Scope {
    pub fn partner(partner_id: impl Into<String>) -> Self {
        Self {
            partner_id: Some(partner_id.into()),
            ..Default::default()
        }
    }

    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Value for `key`; blank strings count as absent.
    pub fn get(&self, key: ScopeKey) -> Option<&str> {
        let value = match key {
            ScopeKey::Partner => &self.partner_id,
            ScopeKey::Store => &self.store_id,
            ScopeKey::Product => &self.product_id,
            ScopeKey::Variant => &self.variant_id,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: ScopeKey, value: Option<String>) {
        let slot = match key {
            ScopeKey::Partner => &mut self.partner_id,
            ScopeKey::Store => &mut self.store_id,
            ScopeKey::Product => &mut self.product_id,
            ScopeKey::Variant => &mut self.variant_id,
        };
        *slot = value.filter(|v| !v.trim().is_empty());
    }

    /// First key from `required` that has no value.
    pub fn missing(&self, required: &[ScopeKey]) -> Option<ScopeKey> {
        required.iter().copied().find(|key| self.get(*key).is_none())
    }

    /// Copy of this scope keeping only the keys `C` depends on.
    pub fn project<C: Collection>(&self) -> Scope {
        let mut projected = Scope::default();
        for key in ScopeKey::ALL.into_iter().filter(|key| C::depends_on(*key)) {
            projected.set(key, self.get(key).map(str::to_string));
        }
        projected
    }
}

/// Describes one entity type held by an [`EntityContainer`].
pub trait Collection: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Short name used in logs and task names.
    const NAME: &'static str;
    /// Resource path below the API root.
    const RESOURCE: &'static str;
    /// Per-container message recorded when a load fails.
    const LOAD_ERROR: &'static str;
    /// Keys that must be present before a request is issued.
    const REQUIRED: &'static [ScopeKey];
    /// Keys forwarded as filters when present.
    const OPTIONAL: &'static [ScopeKey] = &[];

    fn item_id(item: &Self::Item) -> &str;

    /// Row post-processing applied after decoding.
    fn prepare(item: Self::Item) -> Self::Item {
        item
    }

    /// Whether a change of `key` affects what this collection lists.
    fn depends_on(key: ScopeKey) -> bool {
        Self::REQUIRED.contains(&key) || Self::OPTIONAL.contains(&key)
    }
}

/// Observable container state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// List query defaults appended to every load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 0,
            size: 100,
            sort_by: "createdAt".to_string(),
        }
    }
}

impl Paging {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page: 0,
            size: config.page_size,
            sort_by: config.sort_by.clone(),
        }
    }
}

struct Inner<C: Collection> {
    gateway: Gateway,
    paging: Paging,
    state: watch::Sender<ListState<C::Item>>,
    generation: AtomicU64,
    _collection: PhantomData<fn() -> C>,
}

/// Reactive list of one entity type. Clones share the same state.
pub struct EntityContainer<C: Collection> {
    inner: Arc<Inner<C>>,
}

impl<C: Collection> Clone for EntityContainer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Collection> std::fmt::Debug for EntityContainer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("EntityContainer")
            .field("collection", &C::NAME)
            .field("items", &state.items.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish()
    }
}

impl<C: Collection> EntityContainer<C> {
    pub fn new(gateway: Gateway, paging: Paging) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                paging,
                state,
                generation: AtomicU64::new(0),
                _collection: PhantomData,
            }),
        }
    }

    /// Read-only view of the state.
    pub fn subscribe(&self) -> watch::Receiver<ListState<C::Item>> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> ListState<C::Item> {
        self.inner.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<C::Item> {
        self.inner.state.borrow().items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    /// Validate `scope` and flip the state for a new load.
    ///
    /// Returns `None` (and resets to the empty state) when a required key is
    /// missing; no request is issued in that case.
    pub fn begin_load(&self, scope: &Scope) -> Option<PendingLoad<C>> {
        let missing = scope.missing(C::REQUIRED);
        let mut generation = 0;

        self.inner.state.send_modify(|state| {
            generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
            state.error = None;
            if missing.is_some() {
                state.items.clear();
                state.loading = false;
            } else {
                state.loading = true;
            }
        });

        if let Some(key) = missing {
            tracing::debug!(
                collection = C::NAME,
                missing = key.param(),
                "Skipping load, required key missing"
            );
            return None;
        }

        Some(PendingLoad {
            container: self.clone(),
            generation,
            options: self.list_options(scope),
            settled: false,
        })
    }

    /// Fire-and-forget load; observe the outcome through the state.
    pub fn load(&self, scope: &Scope) -> Option<JoinHandle<()>> {
        let pending = self.begin_load(scope)?;
        Some(spawn_tracked(C::NAME, async move {
            // Failures are already recorded in the container state
            let _ = pending.run().await;
        }))
    }

    /// Load and wait for the settle. Returns the number of rows stored,
    /// which is 0 when a newer load superseded this one.
    pub async fn fetch(&self, scope: &Scope) -> Result<usize> {
        match self.begin_load(scope) {
            Some(pending) => pending.run().await,
            None => Ok(0),
        }
    }

    /// Drop `id` from the local list. Does not call the backend.
    ///
    /// Returns `false` (state untouched) when `id` is not present.
    pub fn remove(&self, id: &str) -> bool {
        self.inner.state.send_if_modified(|state| {
            let before = state.items.len();
            state.items.retain(|item| C::item_id(item) != id);
            if state.items.len() == before {
                return false;
            }
            state.loading = false;
            state.error = None;
            true
        })
    }

    pub fn get(&self, id: &str) -> Option<C::Item> {
        self.find(|item| C::item_id(item) == id)
    }

    pub fn find(&self, predicate: impl Fn(&C::Item) -> bool) -> Option<C::Item> {
        self.inner.state.borrow().items.iter().find(|item| predicate(item)).cloned()
    }

    pub fn filter(&self, predicate: impl Fn(&C::Item) -> bool) -> Vec<C::Item> {
        self.inner
            .state
            .borrow()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn dismiss_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Prepend a client-side row (upload placeholders).
    pub(crate) fn insert_local(&self, item: C::Item) {
        self.inner.state.send_modify(|state| state.items.insert(0, item));
    }

    /// Swap the row `id` for `item` in place.
    pub(crate) fn replace_local(&self, id: &str, item: C::Item) -> bool {
        self.inner.state.send_if_modified(|state| {
            match state.items.iter_mut().find(|row| C::item_id(row) == id) {
                Some(row) => {
                    *row = item;
                    true
                }
                None => false,
            }
        })
    }

    fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    fn list_options(&self, scope: &Scope) -> RequestOptions {
        let paging = &self.inner.paging;
        let options = ScopeKey::ALL
            .into_iter()
            .filter(|key| C::depends_on(*key))
            .fold(RequestOptions::new(), |options, key| {
                options.query_opt(key.param(), scope.get(key))
            });
        options
            .query("page", paging.page)
            .query("size", paging.size)
            .query("sortBy", &paging.sort_by)
    }
}

/// An accepted load that has not settled yet.
///
/// Dropping it unsettled (panic, abort) still clears `loading` if no newer
/// load has started.
#[must_use = "a pending load does nothing until `run` is awaited"]
pub struct PendingLoad<C: Collection> {
    container: EntityContainer<C>,
    generation: u64,
    options: RequestOptions,
    settled: bool,
}

impl<C: Collection> PendingLoad<C> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issue the request and settle the container.
    #[tracing::instrument(skip(self), fields(collection = C::NAME, generation = self.generation))]
    pub async fn run(mut self) -> Result<usize> {
        let options = std::mem::take(&mut self.options);
        let outcome = self
            .container
            .inner
            .gateway
            .get_data::<ListPayload<C::Item>>(C::RESOURCE, options)
            .await;

        match outcome {
            Ok(payload) => {
                let items: Vec<C::Item> = payload.into_items().into_iter().map(C::prepare).collect();
                let count = items.len();
                if !self.settle(Some(items)) {
                    return Ok(0);
                }
                tracing::debug!(count, "Load settled");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Load failed");
                self.settle(None);
                Err(err)
            }
        }
    }

    /// Store the outcome unless a newer load started. Returns whether it was applied.
    fn settle(&mut self, items: Option<Vec<C::Item>>) -> bool {
        self.settled = true;
        let generation = self.generation;
        let container = &self.container;

        let applied = container.inner.state.send_if_modified(|state| {
            if container.current_generation() != generation {
                return false;
            }
            match items {
                Some(items) => {
                    state.items = items;
                    state.error = None;
                }
                None => {
                    state.items.clear();
                    state.error = Some(C::LOAD_ERROR.to_string());
                }
            }
            state.loading = false;
            true
        });

        if !applied {
            tracing::debug!(generation, "Discarding stale load result");
        }
        applied
    }
}

impl<C: Collection> Drop for PendingLoad<C> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.generation;
        let container = &self.container;
        container.inner.state.send_if_modified(|state| {
            if container.current_generation() != generation || !state.loading {
                return false;
            }
            state.loading = false;
            true
        });
    }
}
