//! # Hero Banner Endpoints

use shared::{Hero, HeroDraft, HeroPatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use crate::core::error::Result;

pub const RESOURCE: &str = "heroes";

pub async fn create_hero(gateway: &Gateway, partner_id: &str, store_id: &str, draft: &HeroDraft) -> Result<Hero> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, Some(store_id))).await
}

pub async fn update_hero(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    hero_id: &str,
    patch: &HeroPatch,
) -> Result<Hero> {
    resource::update(gateway, RESOURCE, hero_id, patch, scoped(partner_id, Some(store_id))).await
}
