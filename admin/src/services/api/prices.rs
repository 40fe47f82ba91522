//! # Price Endpoints
//!
//! A price is created on its own, then linked to either a product or a
//! variant.

use shared::{Price, PriceDraft, PricePatch};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use super::{products, variants};
use crate::core::error::Result;

pub const RESOURCE: &str = "prices";

/// What a price is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceOwner {
    Product(String),
    Variant(String),
}

impl PriceOwner {
    pub fn id(&self) -> &str {
        match self {
            PriceOwner::Product(id) | PriceOwner::Variant(id) => id,
        }
    }

    fn resource(&self) -> &'static str {
        match self {
            PriceOwner::Product(_) => products::RESOURCE,
            PriceOwner::Variant(_) => variants::RESOURCE,
        }
    }
}

pub async fn create_price(gateway: &Gateway, partner_id: &str, draft: &PriceDraft) -> Result<Price> {
    resource::create(gateway, RESOURCE, draft, scoped(partner_id, None)).await
}

pub async fn update_price(
    gateway: &Gateway,
    partner_id: &str,
    price_id: &str,
    patch: &PricePatch,
) -> Result<Price> {
    resource::update(gateway, RESOURCE, price_id, patch, scoped(partner_id, None)).await
}

/// `POST {products|variants}/{owner_id}/prices/{price_id}`
pub async fn attach_price(
    gateway: &Gateway,
    partner_id: &str,
    owner: &PriceOwner,
    price_id: &str,
) -> Result<()> {
    resource::attach(gateway, owner.resource(), owner.id(), RESOURCE, price_id, scoped(partner_id, None)).await
}
