//! # Collections
//!
//! The eight entity containers of the admin client and their lookups.
//!
//! | Collection      | Resource    | Required keys       | Optional filters |
//! |-----------------|-------------|---------------------|------------------|
//! | `Stores`        | `stores`    | partner             |                  |
//! | `Products`      | `products`  | partner             | store            |
//! | `Variants`      | `variants`  | partner, product    | store            |
//! | `Inventories`   | `inventory` | partner             | store            |
//! | `ProductPrices` | `prices`    | partner, product    |                  |
//! | `VariantPrices` | `prices`    | partner, variant    |                  |
//! | `Images`        | `images`    | partner             |                  |
//! | `Heroes`        | `heroes`    | partner, store      |                  |
//!
//! Only these keys go on the list query, and only a change to one of them
//! reloads a bound container.

use shared::{Hero, Image, ImageStatus, Inventory, Price, Product, Store, Variant};

use crate::app::container::{Collection, EntityContainer, ScopeKey};

/// Id prefix of client-side upload placeholders.
pub const PLACEHOLDER_PREFIX: &str = "pending-";

pub struct Stores;

impl Collection for Stores {
    type Item = Store;
    const NAME: &'static str = "stores";
    const RESOURCE: &'static str = "stores";
    const LOAD_ERROR: &'static str = "Failed to load stores";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner];

    fn item_id(item: &Store) -> &str {
        &item.id
    }
}

pub struct Products;

impl Collection for Products {
    type Item = Product;
    const NAME: &'static str = "products";
    const RESOURCE: &'static str = "products";
    const LOAD_ERROR: &'static str = "Failed to load products";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner];
    const OPTIONAL: &'static [ScopeKey] = &[ScopeKey::Store];

    fn item_id(item: &Product) -> &str {
        &item.id
    }
}

impl EntityContainer<Products> {
    /// Products whose embedded store snapshot matches `store_id`.
    pub fn for_store(&self, store_id: &str) -> Vec<Product> {
        self.filter(|product| {
            product
                .store
                .as_ref()
                .is_some_and(|store| store.id == store_id)
        })
    }
}

pub struct Variants;

impl Collection for Variants {
    type Item = Variant;
    const NAME: &'static str = "variants";
    const RESOURCE: &'static str = "variants";
    const LOAD_ERROR: &'static str = "Failed to load variants";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner, ScopeKey::Product];
    const OPTIONAL: &'static [ScopeKey] = &[ScopeKey::Store];

    fn item_id(item: &Variant) -> &str {
        &item.id
    }

    fn prepare(mut item: Variant) -> Variant {
        item.display_title = match item.product.as_ref().filter(|p| !p.name.is_empty()) {
            Some(product) => format!("{} / {}", product.name, item.name),
            None => item.name.clone(),
        };
        item
    }
}

impl EntityContainer<Variants> {
    pub fn by_sku(&self, sku: &str) -> Option<Variant> {
        self.find(|variant| variant.sku.eq_ignore_ascii_case(sku))
    }
}

pub struct Inventories;

impl Collection for Inventories {
    type Item = Inventory;
    const NAME: &'static str = "inventory";
    const RESOURCE: &'static str = "inventory";
    const LOAD_ERROR: &'static str = "Failed to load inventory";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner];
    const OPTIONAL: &'static [ScopeKey] = &[ScopeKey::Store];

    fn item_id(item: &Inventory) -> &str {
        &item.id
    }

    fn prepare(mut item: Inventory) -> Inventory {
        item.display_title = match item.variant.as_ref() {
            Some(variant) if !variant.sku.is_empty() => format!("{} ({})", variant.name, variant.sku),
            Some(variant) => variant.name.clone(),
            None => item.location.clone().unwrap_or_default(),
        };
        item
    }
}

impl EntityContainer<Inventories> {
    pub fn for_variant(&self, variant_id: &str) -> Vec<Inventory> {
        self.filter(|row| row.variant.as_ref().is_some_and(|v| v.id == variant_id))
    }

    /// Sum of on-hand quantity across locations.
    pub fn total_quantity(&self, variant_id: &str) -> i64 {
        self.for_variant(variant_id).iter().map(|row| row.quantity).sum()
    }
}

pub struct ProductPrices;

impl Collection for ProductPrices {
    type Item = Price;
    const NAME: &'static str = "product-prices";
    const RESOURCE: &'static str = "prices";
    const LOAD_ERROR: &'static str = "Failed to load product prices";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner, ScopeKey::Product];

    fn item_id(item: &Price) -> &str {
        &item.id
    }
}

pub struct VariantPrices;

impl Collection for VariantPrices {
    type Item = Price;
    const NAME: &'static str = "variant-prices";
    const RESOURCE: &'static str = "prices";
    const LOAD_ERROR: &'static str = "Failed to load variant prices";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner, ScopeKey::Variant];

    fn item_id(item: &Price) -> &str {
        &item.id
    }
}

impl<C> EntityContainer<C>
where
    C: Collection<Item = Price>,
{
    /// First active price, optionally restricted to one currency.
    pub fn active_price(&self, currency: Option<&str>) -> Option<Price> {
        self.find(|price| {
            price.active && currency.map_or(true, |c| price.currency.eq_ignore_ascii_case(c))
        })
    }
}

pub struct Images;

impl Collection for Images {
    type Item = Image;
    const NAME: &'static str = "images";
    const RESOURCE: &'static str = "images";
    const LOAD_ERROR: &'static str = "Failed to load images";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner];

    fn item_id(item: &Image) -> &str {
        &item.id
    }
}

impl EntityContainer<Images> {
    pub fn active(&self) -> Vec<Image> {
        self.filter(|image| image.status == ImageStatus::Active)
    }

    /// Rows standing in for uploads that have not completed.
    pub fn placeholders(&self) -> Vec<Image> {
        self.filter(|image| image.id.starts_with(PLACEHOLDER_PREFIX))
    }
}

pub struct Heroes;

impl Collection for Heroes {
    type Item = Hero;
    const NAME: &'static str = "heroes";
    const RESOURCE: &'static str = "heroes";
    const LOAD_ERROR: &'static str = "Failed to load hero banners";
    const REQUIRED: &'static [ScopeKey] = &[ScopeKey::Partner, ScopeKey::Store];

    fn item_id(item: &Hero) -> &str {
        &item.id
    }
}

impl EntityContainer<Heroes> {
    /// Active banners in display order.
    pub fn active_heroes(&self) -> Vec<Hero> {
        let mut heroes = self.filter(|hero| hero.active);
        heroes.sort_by_key(|hero| hero.position);
        heroes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::container::{Paging, Scope};
    use crate::test_support::{gateway_with, MockTransport};
    use serde_json::json;

    async fn loaded<C: Collection>(scope: Scope, data: serde_json::Value) -> EntityContainer<C> {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": data }));
        let container = EntityContainer::<C>::new(gateway_with(&transport), Paging::default());
        container.fetch(&scope).await.unwrap();
        container
    }

    #[tokio::test]
    async fn test_variant_display_title_and_metadata() {
        let variants: EntityContainer<Variants> = loaded(
            Scope::partner("p-1").with_product("pr-1"),
            json!([
                { "id": "v-1", "name": "Large", "sku": "TS-L", "product": { "id": "pr-1", "name": "T-Shirt" }, "metadata": "{\"color\":\"red\"}" },
                { "id": "v-2", "name": "Loose", "sku": "LS-1" }
            ]),
        )
        .await;

        let large = variants.get("v-1").unwrap();
        assert_eq!(large.display_title, "T-Shirt / Large");
        assert_eq!(large.metadata["color"], "red");
        assert_eq!(variants.get("v-2").unwrap().display_title, "Loose");
        assert_eq!(variants.by_sku("ts-l").unwrap().id, "v-1");
    }

    #[tokio::test]
    async fn test_inventory_lookups() {
        let inventory: EntityContainer<Inventories> = loaded(
            Scope::partner("p-1"),
            json!({ "content": [
                { "id": "i-1", "quantity": 4, "location": "A", "variant": { "id": "v-1", "name": "Large", "sku": "TS-L" } },
                { "id": "i-2", "quantity": 6, "location": "B", "variant": { "id": "v-1", "name": "Large", "sku": "TS-L" } },
                { "id": "i-3", "quantity": 1, "variant": { "id": "v-2", "name": "Small", "sku": "" } }
            ] }),
        )
        .await;

        assert_eq!(inventory.total_quantity("v-1"), 10);
        assert_eq!(inventory.for_variant("v-2").len(), 1);
        assert_eq!(inventory.get("i-1").unwrap().display_title, "Large (TS-L)");
        assert_eq!(inventory.get("i-3").unwrap().display_title, "Small");
    }

    #[tokio::test]
    async fn test_products_for_store() {
        let products: EntityContainer<Products> = loaded(
            Scope::partner("p-1"),
            json!([
                { "id": "pr-1", "name": "Mug", "store": { "id": "s-1", "name": "Main" } },
                { "id": "pr-2", "name": "Cap", "store": { "id": "s-2", "name": "Outlet" } },
                { "id": "pr-3", "name": "Pin" }
            ]),
        )
        .await;

        let ids: Vec<_> = products.for_store("s-1").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["pr-1"]);
    }

    #[tokio::test]
    async fn test_active_price() {
        let prices: EntityContainer<VariantPrices> = loaded(
            Scope::partner("p-1").with_variant("v-1"),
            json!([
                { "id": "pc-1", "amount": 10.0, "currency": "USD", "active": false },
                { "id": "pc-2", "amount": 12.5, "currency": "USD", "active": true },
                { "id": "pc-3", "amount": 11.0, "currency": "EUR", "active": true }
            ]),
        )
        .await;

        assert_eq!(prices.active_price(None).unwrap().id, "pc-2");
        assert_eq!(prices.active_price(Some("eur")).unwrap().id, "pc-3");
        assert!(prices.active_price(Some("GBP")).is_none());
    }

    #[tokio::test]
    async fn test_heroes_sorted_by_position() {
        let heroes: EntityContainer<Heroes> = loaded(
            Scope::partner("p-1").with_store("s-1"),
            json!([
                { "id": "h-1", "title": "Late", "position": 3, "active": true },
                { "id": "h-2", "title": "Hidden", "position": 0, "active": false },
                { "id": "h-3", "title": "First", "position": 1, "active": true }
            ]),
        )
        .await;

        let order: Vec<_> = heroes.active_heroes().into_iter().map(|h| h.id).collect();
        assert_eq!(order, vec!["h-3", "h-1"]);
    }

    #[tokio::test]
    async fn test_price_containers_filter_by_their_own_owner() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": [] }));
        transport.reply(json!({ "data": [] }));
        let gateway = gateway_with(&transport);
        let product_prices = EntityContainer::<ProductPrices>::new(gateway.clone(), Paging::default());
        let variant_prices = EntityContainer::<VariantPrices>::new(gateway, Paging::default());
        let scope = Scope::partner("p-1").with_product("pr-1").with_variant("v-1");

        product_prices.fetch(&scope).await.unwrap();
        variant_prices.fetch(&scope).await.unwrap();

        let calls = transport.calls();
        assert_ne!(calls[0].query, calls[1].query);
        assert_eq!(calls[0].query_value("productId"), Some("pr-1"));
        assert_eq!(calls[0].query_value("variantId"), None);
        assert_eq!(calls[1].query_value("variantId"), Some("v-1"));
        assert_eq!(calls[1].query_value("productId"), None);
    }

    #[tokio::test]
    async fn test_unrelated_keys_not_forwarded() {
        let transport = MockTransport::new();
        transport.reply(json!({ "data": [] }));
        transport.reply(json!({ "data": [] }));
        let gateway = gateway_with(&transport);
        let scope = Scope::partner("p-1").with_store("s-1").with_product("pr-1").with_variant("v-1");

        EntityContainer::<Stores>::new(gateway.clone(), Paging::default()).fetch(&scope).await.unwrap();
        EntityContainer::<Products>::new(gateway, Paging::default()).fetch(&scope).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].query_value("storeId"), None);
        assert_eq!(calls[0].query_value("productId"), None);
        assert_eq!(calls[1].query_value("storeId"), Some("s-1"));
        assert_eq!(calls[1].query_value("productId"), None);
        assert_eq!(calls[1].query_value("variantId"), None);
    }

    #[tokio::test]
    async fn test_heroes_require_store() {
        let transport = MockTransport::new();
        let heroes = EntityContainer::<Heroes>::new(gateway_with(&transport), Paging::default());
        heroes.fetch(&Scope::partner("p-1")).await.unwrap();
        assert_eq!(transport.call_count(), 0);
    }
}
