//! # Generic Resource Calls
//!
//! Path and query construction shared by the per-resource modules.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::Result;
use crate::services::api::gateway::{Gateway, RequestOptions};

/// `?partnerId=&storeId=` (blank values omitted).
pub fn scoped(partner_id: &str, store_id: Option<&str>) -> RequestOptions {
    RequestOptions::new()
        .query_opt("partnerId", Some(partner_id))
        .query_opt("storeId", store_id)
}

/// `GET {resource}/{id}`
pub async fn get_by_id<T: DeserializeOwned>(
    gateway: &Gateway,
    resource: &str,
    id: &str,
    options: RequestOptions,
) -> Result<T> {
    gateway.get_data(&format!("{resource}/{id}"), options).await
}

/// `POST {resource}`
pub async fn create<B, T>(gateway: &Gateway, resource: &str, body: &B, options: RequestOptions) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    gateway.post_data(resource, body, options).await
}

/// `PATCH {resource}/{id}`
pub async fn update<B, T>(
    gateway: &Gateway,
    resource: &str,
    id: &str,
    body: &B,
    options: RequestOptions,
) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    gateway.patch_data(&format!("{resource}/{id}"), body, options).await
}

/// `DELETE {resource}/{id}` → the backend's `{ data: bool }` flag.
pub async fn delete(gateway: &Gateway, resource: &str, id: &str, options: RequestOptions) -> Result<bool> {
    gateway.delete_data(&format!("{resource}/{id}"), options).await
}

/// `POST {parent}/{parent_id}/{child}/{child_id}`: link two existing entities.
#[tracing::instrument(skip(gateway, options))]
pub async fn attach(
    gateway: &Gateway,
    parent: &str,
    parent_id: &str,
    child: &str,
    child_id: &str,
    options: RequestOptions,
) -> Result<()> {
    gateway
        .post(&format!("{parent}/{parent_id}/{child}/{child_id}"), None, options)
        .await?;
    tracing::debug!("Association created");
    Ok(())
}
