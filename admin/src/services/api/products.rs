//! # Product Endpoints

use shared::{Product, ProductDraft, ProductPatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use super::stores;
use crate::core::error::Result;

pub const RESOURCE: &str = "products";

pub async fn get_product(gateway: &Gateway, partner_id: &str, product_id: &str) -> Result<Product> {
    resource::get_by_id(gateway, RESOURCE, product_id, scoped(partner_id, None)).await
}

pub async fn create_product(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    draft: &ProductDraft,
) -> Result<Product> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, Some(store_id))).await
}

pub async fn update_product(
    gateway: &Gateway,
    partner_id: &str,
    product_id: &str,
    patch: &ProductPatch,
) -> Result<Product> {
    resource::update(gateway, RESOURCE, product_id, patch, scoped(partner_id, None)).await
}

/// `POST stores/{store_id}/products/{product_id}`
pub async fn attach_to_store(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    product_id: &str,
) -> Result<()> {
    resource::attach(gateway, stores::RESOURCE, store_id, RESOURCE, product_id, scoped(partner_id, None)).await
}
