//! # Catalog Flows
//!
//! Create / edit / delete sequences behind the catalog dialogs. Each flow
//! validates its draft first (nothing is sent on a validation error), then
//! runs at most three dependent calls in order. The first failing step ends
//! the flow; earlier steps are not rolled back.
//!
//! ```text
//! create_product:  POST products ──► POST stores/{sid}/products/{pid}
//! create_variant:  POST variants ──► POST products/{pid}/variants/{vid} ──► POST stores/{sid}/variants/{vid}
//! create_price:    POST prices   ──► POST {products|variants}/{id}/prices/{priceId}
//! ```

use shared::{
    Inventory, InventoryDraft, InventoryPatch, Price, PriceDraft, PricePatch, Product, ProductDraft,
    ProductPatch, Store, StoreDraft, StorePatch, Variant, VariantDraft, VariantPatch,
};

use crate::app::dialog::DialogResult;
use crate::core::error::{AppError, Result};
use crate::services::api::resource::{self, scoped};
use crate::services::api::{inventory, prices, products, stores, variants, Gateway, PriceOwner};
use crate::utils::validation::{
    validate_amount, validate_currency, validate_name, validate_price, validate_quantity, validate_sku,
};

pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{what} is required")));
    }
    Ok(())
}

#[tracing::instrument(skip(gateway, draft), fields(name = %draft.name))]
pub async fn create_store(gateway: &Gateway, partner_id: &str, draft: &StoreDraft) -> Result<Store> {
    require(partner_id, "Partner id")?;
    validate_name(&draft.name, "Store name").into_result()?;

    let store = stores::create_store(gateway, partner_id, draft).await?;
    tracing::info!(store_id = %store.id, "Store created");
    Ok(store)
}

pub async fn update_store(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    patch: &StorePatch,
) -> Result<Store> {
    require(partner_id, "Partner id")?;
    require(store_id, "Store id")?;
    if let Some(name) = &patch.name {
        validate_name(name, "Store name").into_result()?;
    }
    stores::update_store(gateway, partner_id, store_id, patch).await
}

/// Create a product and attach it to `store_id`.
#[tracing::instrument(skip(gateway, draft), fields(name = %draft.name))]
pub async fn create_product(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    draft: &ProductDraft,
) -> Result<Product> {
    require(partner_id, "Partner id")?;
    require(store_id, "Store id")?;
    validate_name(&draft.name, "Product name").into_result()?;

    let product = products::create_product(gateway, partner_id, store_id, draft).await?;
    products::attach_to_store(gateway, partner_id, store_id, &product.id).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok(product)
}

pub async fn update_product(
    gateway: &Gateway,
    partner_id: &str,
    product_id: &str,
    patch: &ProductPatch,
) -> Result<Product> {
    require(partner_id, "Partner id")?;
    require(product_id, "Product id")?;
    if let Some(name) = &patch.name {
        validate_name(name, "Product name").into_result()?;
    }
    products::update_product(gateway, partner_id, product_id, patch).await
}

/// Create a variant, attach it to its product, then to `store_id`.
#[tracing::instrument(skip(gateway, draft), fields(sku = %draft.sku, product_id = %draft.product_id))]
pub async fn create_variant(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    draft: &VariantDraft,
) -> Result<Variant> {
    require(partner_id, "Partner id")?;
    require(store_id, "Store id")?;
    require(&draft.product_id, "Product id")?;
    validate_name(&draft.name, "Variant name").into_result()?;
    validate_sku(&draft.sku).into_result()?;

    let variant = variants::create_variant(gateway, partner_id, draft).await?;
    variants::attach_to_product(gateway, partner_id, &draft.product_id, &variant.id).await?;
    variants::attach_to_store(gateway, partner_id, store_id, &variant.id).await?;

    tracing::info!(variant_id = %variant.id, "Variant created");
    Ok(variant)
}

pub async fn update_variant(
    gateway: &Gateway,
    partner_id: &str,
    variant_id: &str,
    patch: &VariantPatch,
) -> Result<Variant> {
    require(partner_id, "Partner id")?;
    require(variant_id, "Variant id")?;
    if let Some(name) = &patch.name {
        validate_name(name, "Variant name").into_result()?;
    }
    if let Some(sku) = &patch.sku {
        validate_sku(sku).into_result()?;
    }
    variants::update_variant(gateway, partner_id, variant_id, patch).await
}

/// Create a price and attach it to its product or variant.
pub async fn create_price(
    gateway: &Gateway,
    partner_id: &str,
    owner: &PriceOwner,
    draft: &PriceDraft,
) -> Result<Price> {
    require(partner_id, "Partner id")?;
    require(owner.id(), "Price owner id")?;
    validate_price(draft.amount, &draft.currency).into_result()?;

    let price = prices::create_price(gateway, partner_id, draft).await?;
    prices::attach_price(gateway, partner_id, owner, &price.id).await?;

    tracing::info!(price_id = %price.id, owner = ?owner, "Price created");
    Ok(price)
}

pub async fn update_price(
    gateway: &Gateway,
    partner_id: &str,
    price_id: &str,
    patch: &PricePatch,
) -> Result<Price> {
    require(partner_id, "Partner id")?;
    require(price_id, "Price id")?;
    if let Some(amount) = patch.amount {
        validate_amount(amount).into_result()?;
    }
    if let Some(currency) = &patch.currency {
        validate_currency(currency).into_result()?;
    }
    prices::update_price(gateway, partner_id, price_id, patch).await
}

pub async fn create_inventory(
    gateway: &Gateway,
    partner_id: &str,
    store_id: Option<&str>,
    draft: &InventoryDraft,
) -> Result<Inventory> {
    require(partner_id, "Partner id")?;
    require(&draft.variant_id, "Variant id")?;
    validate_quantity(draft.quantity).into_result()?;

    inventory::create_inventory(gateway, partner_id, store_id, draft).await
}

/// Add `delta` (possibly negative) to the on-hand quantity of `row`.
pub async fn adjust_inventory(
    gateway: &Gateway,
    partner_id: &str,
    row: &Inventory,
    delta: i64,
) -> Result<Inventory> {
    require(partner_id, "Partner id")?;
    let quantity = row
        .quantity
        .checked_add(delta)
        .ok_or_else(|| AppError::Validation("Quantity out of range".to_string()))?;
    validate_quantity(quantity).into_result()?;

    let patch = InventoryPatch {
        quantity: Some(quantity),
        location: None,
    };
    inventory::update_inventory(gateway, partner_id, &row.id, &patch).await
}

/// `DELETE {resource}/{id}` for any catalog resource.
#[tracing::instrument(skip(gateway))]
pub async fn delete<T>(
    gateway: &Gateway,
    resource_name: &str,
    id: &str,
    partner_id: &str,
    store_id: Option<&str>,
) -> Result<DialogResult<T>> {
    require(partner_id, "Partner id")?;
    require(id, "Id")?;

    let response = resource::delete(gateway, resource_name, id, scoped(partner_id, store_id)).await?;
    tracing::info!(response, "Delete answered");
    Ok(DialogResult::Deleted {
        response,
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TransportError;
    use crate::test_support::{gateway_with, MockTransport};
    use reqwest::Method;
    use serde_json::json;
    use shared::Metadata;

    fn product_draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            metadata: Metadata::new(),
        }
    }

    #[tokio::test]
    async fn test_create_product_chains_attach() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": { "id": "pr-1", "name": "Mug" } }));
        transport.reply(json!({ "data": true }));
        let gateway = gateway_with(&transport);

        let product = create_product(&gateway, "p-1", "s-1", &product_draft("Mug")).await.unwrap();
        assert_eq!(product.id, "pr-1");

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "products");
        assert_eq!(calls[0].query_value("storeId"), Some("s-1"));
        assert_eq!(calls[0].body.as_ref().unwrap()["metadata"], "{}");
        assert_eq!(calls[1].path, "stores/s-1/products/pr-1");
    }

    #[tokio::test]
    async fn test_validation_sends_nothing() {
        let transport = MockTransport::new();
        let gateway = gateway_with(&transport);

        let err = create_product(&gateway, "p-1", "s-1", &product_draft("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = create_product(&gateway, "", "s-1", &product_draft("Mug")).await.unwrap_err();
        assert_eq!(err, AppError::Validation("Partner id is required".to_string()));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_variant_three_steps_in_order() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": { "id": "v-1", "name": "Large", "sku": "TS-L" } }));
        transport.reply(json!({ "data": true }));
        transport.reply(json!({ "data": true }));
        let gateway = gateway_with(&transport);

        let draft = VariantDraft {
            name: "Large".into(),
            sku: "TS-L".into(),
            product_id: "pr-1".into(),
            metadata: Metadata::new(),
        };
        create_variant(&gateway, "p-1", "s-1", &draft).await.unwrap();

        let paths: Vec<_> = transport.calls().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["variants", "products/pr-1/variants/v-1", "stores/s-1/variants/v-1"]);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_remaining_steps() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": { "id": "v-1", "name": "Large", "sku": "TS-L" } }));
        transport.fail(TransportError::Status {
            status: 409,
            body: "conflict".into(),
        });
        let gateway = gateway_with(&transport);

        let draft = VariantDraft {
            name: "Large".into(),
            sku: "TS-L".into(),
            product_id: "pr-1".into(),
            metadata: Metadata::new(),
        };
        let err = create_variant(&gateway, "p-1", "s-1", &draft).await.unwrap_err();

        assert_eq!(err.code(), Some("unexpected-api-error"));
        assert_eq!(transport.call_count(), 2, "store attach never issued");
    }

    #[tokio::test]
    async fn test_create_price_for_variant() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": { "id": "pc-1", "amount": 9.5, "currency": "EUR", "active": true } }));
        transport.reply(json!({ "data": true }));
        let gateway = gateway_with(&transport);

        let draft = PriceDraft {
            amount: 9.5,
            currency: "EUR".into(),
            active: true,
        };
        let price = create_price(&gateway, "p-1", &PriceOwner::Variant("v-1".into()), &draft)
            .await
            .unwrap();

        assert_eq!(price.id, "pc-1");
        assert_eq!(transport.calls()[1].path, "variants/v-1/prices/pc-1");
    }

    #[tokio::test]
    async fn test_adjust_inventory_patches_new_quantity() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": { "id": "i-1", "quantity": 7 } }));
        let gateway = gateway_with(&transport);
        let row = Inventory {
            id: "i-1".into(),
            quantity: 10,
            ..Default::default()
        };

        let updated = adjust_inventory(&gateway, "p-1", &row, -3).await.unwrap();
        assert_eq!(updated.quantity, 7);
        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::PATCH);
        assert_eq!(call.path, "inventory/i-1");
        assert_eq!(call.body, Some(json!({ "quantity": 7 })));

        let err = adjust_inventory(&gateway, "p-1", &row, -11).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_backend_flag() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": true }));
        let gateway = gateway_with(&transport);

        let result: DialogResult<Store> = delete(&gateway, "stores", "s-1", "p-1", Some("s-1")).await.unwrap();
        assert_eq!(
            result,
            DialogResult::Deleted {
                response: true,
                id: "s-1".into()
            }
        );
        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::DELETE);
        assert_eq!(call.path, "stores/s-1");
        assert_eq!(call.query_value("storeId"), Some("s-1"));
    }
}
