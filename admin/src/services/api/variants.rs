//! # Variant Endpoints

use shared::{Variant, VariantDraft, VariantPatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use super::{products, stores};
use crate::core::error::Result;

pub const RESOURCE: &str = "variants";

pub async fn get_variant(gateway: &Gateway, partner_id: &str, variant_id: &str) -> Result<Variant> {
    resource::get_by_id(gateway, RESOURCE, variant_id, scoped(partner_id, None)).await
}

pub async fn create_variant(gateway: &Gateway, partner_id: &str, draft: &VariantDraft) -> Result<Variant> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, None)).await
}

pub async fn update_variant(
    gateway: &Gateway,
    partner_id: &str,
    variant_id: &str,
    patch: &VariantPatch,
) -> Result<Variant> {
    resource::update(gateway, RESOURCE, variant_id, patch, scoped(partner_id, None)).await
}

/// `POST products/{product_id}/variants/{variant_id}`
pub async fn attach_to_product(
    gateway: &Gateway,
    partner_id: &str,
    product_id: &str,
    variant_id: &str,
) -> Result<()> {
    resource::attach(gateway, products::RESOURCE, product_id, RESOURCE, variant_id, scoped(partner_id, None)).await
}

/// `POST stores/{store_id}/variants/{variant_id}`
pub async fn attach_to_store(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    variant_id: &str,
) -> Result<()> {
    resource::attach(gateway, stores::RESOURCE, store_id, RESOURCE, variant_id, scoped(partner_id, None)).await
}
