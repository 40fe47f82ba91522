//! # Inventory Endpoints

use shared::{Inventory, InventoryDraft, InventoryPatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use crate::core::error::Result;

pub const RESOURCE: &str = "inventory";

pub async fn create_inventory(
    gateway: &Gateway,
    partner_id: &str,
    store_id: Option<&str>,
    draft: &InventoryDraft,
) -> Result<Inventory> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, store_id)).await
}

pub async fn update_inventory(
    gateway: &Gateway,
    partner_id: &str,
    inventory_id: &str,
    patch: &InventoryPatch,
) -> Result<Inventory> {
    resource::update(gateway, RESOURCE, inventory_id, patch, scoped(partner_id, None)).await
}
