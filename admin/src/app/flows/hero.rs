//! # Hero Banner Flows

use shared::{Hero, HeroDraft, HeroPatch};

use super::catalog::require;
use crate::core::error::Result;
use crate::services::api::{heroes, Gateway};
use crate::utils::validation::{validate_name, validate_url, ValidationResult};

fn validate_cta(label: Option<&str>, url: Option<&str>) -> ValidationResult {
    match (label.filter(|l| !l.trim().is_empty()), url) {
        (Some(_), None) => ValidationResult::err("Call-to-action URL is required with a label"),
        (_, Some(url)) => validate_url(url, "Call-to-action URL"),
        (None, None) => ValidationResult::ok(),
    }
}

#[tracing::instrument(skip(gateway, draft), fields(title = %draft.title))]
pub async fn create_hero(gateway: &Gateway, partner_id: &str, store_id: &str, draft: &HeroDraft) -> Result<Hero> {
    require(partner_id, "Partner id")?;
    require(store_id, "Store id")?;
    validate_name(&draft.title, "Hero title").into_result()?;
    validate_url(&draft.image_url, "Hero image URL").into_result()?;
    validate_cta(draft.cta_label.as_deref(), draft.cta_url.as_deref()).into_result()?;

    let hero = heroes::create_hero(gateway, partner_id, store_id, draft).await?;
    tracing::info!(hero_id = %hero.id, "Hero banner created");
    Ok(hero)
}

pub async fn update_hero(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    hero_id: &str,
    patch: &HeroPatch,
) -> Result<Hero> {
    require(partner_id, "Partner id")?;
    require(store_id, "Store id")?;
    require(hero_id, "Hero id")?;
    if let Some(title) = &patch.title {
        validate_name(title, "Hero title").into_result()?;
    }
    if let Some(image_url) = &patch.image_url {
        validate_url(image_url, "Hero image URL").into_result()?;
    }
    if let Some(cta_url) = &patch.cta_url {
        validate_url(cta_url, "Call-to-action URL").into_result()?;
    }

    heroes::update_hero(gateway, partner_id, store_id, hero_id, patch).await
}

/// Show or hide a banner without touching its content.
pub async fn set_hero_active(
    gateway: &Gateway,
    partner_id: &str,
    store_id: &str,
    hero_id: &str,
    active: bool,
) -> Result<Hero> {
    let patch = HeroPatch {
        active: Some(active),
        ..Default::default()
    };
    update_hero(gateway, partner_id, store_id, hero_id, &patch).await
}
