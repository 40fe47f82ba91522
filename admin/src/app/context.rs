//! # Context Provider
//!
//! Publishes the current partner / store / product / variant identifiers
//! as a [`Scope`] on a `watch` channel. Two sources feed it:
//!
//! - the route: path pairs (`/partners/{id}/stores/{id}`) and query
//!   parameters (`?partnerId=`), re-read on every navigation
//! - the bearer token claims (`partnerId`, `storeId`)
//!
//! [`Precedence`] decides which source wins per key when both have a value.
//! Containers subscribe through [`ContextProvider::bind`].

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lib_auth::{decode_claims, Claims, TokenError};
use parking_lot::Mutex;
use reqwest::Url;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::container::{Collection, EntityContainer, Scope, ScopeKey};
use crate::debug::spawn_tracked;

/// Base used to resolve relative routes.
const ROUTE_BASE: &str = "http://admin.local/";

/// Which source wins when route and token both carry a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    #[default]
    Route,
    Token,
}

#[derive(Debug, Default)]
struct Sources {
    route: Scope,
    token: Scope,
    current_route: Option<String>,
    precedence: Precedence,
}

impl Sources {
    fn merged(&self) -> Scope {
        let (primary, fallback) = match self.precedence {
            Precedence::Route => (&self.route, &self.token),
            Precedence::Token => (&self.token, &self.route),
        };
        let mut scope = Scope::default();
        for key in ScopeKey::ALL {
            let value = primary.get(key).or_else(|| fallback.get(key));
            scope.set(key, value.map(str::to_string));
        }
        scope
    }
}

/// Source of truth for the navigation context.
#[derive(Debug)]
pub struct ContextProvider {
    scope: watch::Sender<Scope>,
    sources: Mutex<Sources>,
    /// Routes already force-reloaded this session
    reloaded: Mutex<HashSet<String>>,
    /// Bumped by every forced reload; bindings reload even if their keys did not change
    reload_epoch: Arc<AtomicU64>,
}

impl Default for ContextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextProvider {
    pub fn new() -> Self {
        let (scope, _) = watch::channel(Scope::default());
        Self {
            scope,
            sources: Mutex::new(Sources::default()),
            reloaded: Mutex::new(HashSet::new()),
            reload_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Scope> {
        self.scope.subscribe()
    }

    pub fn current(&self) -> Scope {
        self.scope.borrow().clone()
    }

    pub fn partner_id(&self) -> Option<String> {
        self.scope.borrow().partner_id.clone()
    }

    pub fn store_id(&self) -> Option<String> {
        self.scope.borrow().store_id.clone()
    }

    pub fn current_route(&self) -> Option<String> {
        self.sources.lock().current_route.clone()
    }

    pub fn set_partner_id(&self, partner_id: Option<String>) -> bool {
        self.set_key(ScopeKey::Partner, partner_id)
    }

    pub fn set_store_id(&self, store_id: Option<String>) -> bool {
        self.set_key(ScopeKey::Store, store_id)
    }

    pub fn set_product_id(&self, product_id: Option<String>) -> bool {
        self.set_key(ScopeKey::Product, product_id)
    }

    pub fn set_variant_id(&self, variant_id: Option<String>) -> bool {
        self.set_key(ScopeKey::Variant, variant_id)
    }

    pub fn set_precedence(&self, precedence: Precedence) -> bool {
        let mut sources = self.sources.lock();
        sources.precedence = precedence;
        self.publish(&sources)
    }

    /// Re-read the route after a navigation settled.
    ///
    /// Path segments win over query parameters. Returns the published scope.
    pub fn on_navigation(&self, route: &str) -> Scope {
        let url = match Url::parse(ROUTE_BASE).and_then(|base| base.join(route)) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "Ignoring unparseable route");
                return self.current();
            }
        };

        let route_scope = scope_from_url(&url);
        let route_key = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        tracing::debug!(route = %route_key, scope = ?route_scope, "Navigation settled");

        let mut sources = self.sources.lock();
        sources.route = route_scope;
        sources.current_route = Some(route_key);
        self.publish(&sources);
        sources.merged()
    }

    /// Decode `token` and use its claims as the token source.
    pub fn apply_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode_claims(token)?;
        if claims.is_expired() {
            tracing::warn!(sub = ?claims.sub, "Applying an expired token");
        }

        let mut token_scope = Scope::default();
        token_scope.set(ScopeKey::Partner, claims.partner_id.clone());
        token_scope.set(ScopeKey::Store, claims.store_id.clone());

        let mut sources = self.sources.lock();
        sources.token = token_scope;
        self.publish(&sources);
        Ok(claims)
    }

    pub fn clear_token(&self) -> bool {
        let mut sources = self.sources.lock();
        sources.token = Scope::default();
        self.publish(&sources)
    }

    /// Force one re-notification of the current route.
    ///
    /// Each route is reloaded at most once per session; returns `false`
    /// when the route was already reloaded or no route is known.
    pub fn reload_current_route(&self) -> bool {
        let Some(route) = self.current_route() else {
            return false;
        };
        if !self.reloaded.lock().insert(route.clone()) {
            tracing::debug!(route = %route, "Route already reloaded this session");
            return false;
        }
        tracing::info!(route = %route, "Reloading current route");
        self.reload_epoch.fetch_add(1, Ordering::AcqRel);
        self.scope.send_modify(|_| {});
        true
    }

    /// Keep `container` loaded for the current context.
    ///
    /// Loads once for the context as it is now, then again whenever one of
    /// the keys the collection depends on changes value (or the route is
    /// force-reloaded), until the returned [`Binding`] is dropped.
    pub fn bind<C: Collection>(&self, container: EntityContainer<C>) -> Binding {
        let mut changes = self.scope.subscribe();
        let reload_epoch = Arc::clone(&self.reload_epoch);
        let scope = changes.borrow_and_update().clone();
        let mut loaded = scope.project::<C>();
        let mut seen_epoch = reload_epoch.load(Ordering::Acquire);
        container.load(&scope);

        let task = spawn_tracked("context:binding", async move {
            while changes.changed().await.is_ok() {
                let scope = changes.borrow_and_update().clone();
                let projected = scope.project::<C>();
                let epoch = reload_epoch.load(Ordering::Acquire);
                if projected == loaded && epoch == seen_epoch {
                    tracing::trace!(collection = C::NAME, "Context change does not affect collection");
                    continue;
                }
                loaded = projected;
                seen_epoch = epoch;
                container.load(&scope);
            }
        });

        Binding {
            collection: C::NAME,
            task,
        }
    }

    fn set_key(&self, key: ScopeKey, value: Option<String>) -> bool {
        let mut sources = self.sources.lock();
        sources.route.set(key, value);
        self.publish(&sources)
    }

    fn publish(&self, sources: &Sources) -> bool {
        let merged = sources.merged();
        self.scope.send_if_modified(|scope| {
            if *scope == merged {
                return false;
            }
            *scope = merged;
            true
        })
    }
}

fn scope_from_url(url: &Url) -> Scope {
    let mut scope = Scope::default();

    for (name, value) in url.query_pairs() {
        if let Some(key) = ScopeKey::ALL.into_iter().find(|key| key.param() == name) {
            scope.set(key, Some(value.into_owned()));
        }
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    for pair in segments.windows(2) {
        let key = match pair[0] {
            "partners" => ScopeKey::Partner,
            "stores" => ScopeKey::Store,
            "products" => ScopeKey::Product,
            "variants" => ScopeKey::Variant,
            _ => continue,
        };
        scope.set(key, Some(pair[1].to_string()));
    }

    scope
}

/// Standing subscription of one container to the context.
#[derive(Debug)]
pub struct Binding {
    collection: &'static str,
    task: JoinHandle<()>,
}

impl Binding {
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop reacting to context changes. In-flight loads still settle.
    pub fn unbind(self) {
        drop(self);
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.task.abort();
    }
}
