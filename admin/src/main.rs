//! `partner-admin [ROUTE_URL]`
//!
//! Loads configuration, applies `ADMIN_BEARER_TOKEN` when set, navigates to
//! the route and logs a one-shot summary of the partner's catalog.

use partner_admin::app::container::Scope;
use partner_admin::core::error::AppError;
use partner_admin::{debug, App};

const DEFAULT_ROUTE: &str = "/";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // .env first so RUST_LOG and ADMIN_LOG_* reach the logger
    let _ = dotenvy::dotenv();
    debug::init();

    let config = lib_core::init_config()?;
    let app = App::new(config)?;

    if let Ok(token) = lib_utils::envs::get_env("ADMIN_BEARER_TOKEN") {
        let claims = app.auth().restore(&token)?;
        tracing::info!(
            partner_id = ?claims.partner_id,
            expired = claims.is_expired(),
            "Bearer token applied"
        );
    }

    let route = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ROUTE.to_string());
    let scope = app.context.on_navigation(&route);
    let Some(partner_id) = scope.partner_id.clone() else {
        tracing::warn!(route = %route, "No partner in route or token, nothing to load");
        return Ok(());
    };

    summarize(&app, &scope).await;
    tracing::info!(partner_id = %partner_id, "Done");
    Ok(())
}

async fn summarize(app: &App, scope: &Scope) {
    let (stores, products, images) = tokio::join!(
        app.stores.fetch(scope),
        app.products.fetch(scope),
        app.images.fetch(scope),
    );

    for (name, result) in [("stores", stores), ("products", products), ("images", images)] {
        match result {
            Ok(count) => tracing::info!(collection = name, count, "Loaded"),
            Err(err) => tracing::error!(collection = name, error = %err, "Load failed"),
        }
    }

    for store in app.stores.items() {
        let products = app.products.for_store(&store.id).len();
        tracing::info!(store_id = %store.id, name = %store.name, products, "Store");
    }
    tracing::info!(active_images = app.images.active().len(), "Images");

    if let Some(error) = app.status().error {
        tracing::warn!(error = %error, "Last API error");
    }
}
