//! # Store Endpoints

use shared::{Store, StoreDraft, StorePatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use crate::core::error::Result;

pub const RESOURCE: &str = "stores";

pub async fn get_store(gateway: &Gateway, partner_id: &str, store_id: &str) -> Result<Store> {
    resource::get_by_id(gateway, RESOURCE, store_id, scoped(partner_id, None)).await
}

pub async fn create_store(gateway: &Gateway, partner_id: &str, draft: &StoreDraft) -> Result<Store> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, None)).await
}

pub async fn update_store(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    patch: &StorePatch,
) -> Result<Store> {
    resource::update(gateway, RESOURCE, store_id, patch, scoped(partner_id, None)).await
}
