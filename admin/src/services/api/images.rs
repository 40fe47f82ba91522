//! # Image Endpoints
//!
//! Two-phase upload: ask for a signed URL (this also registers a pending
//! image), `PUT` the bytes to storage outside the Gateway, then mark the
//! image active.

use shared::{Image, ImageStatusUpdate, ImageUploadRequest, SignedUpload};

use super::gateway::Gateway;
use super::resource::{self, scoped};
use crate::core::error::Result;

pub const RESOURCE: &str = "images";

#[tracing::instrument(skip(gateway, request), fields(file_name = %request.file_name, size = request.size))]
pub async fn request_upload(
    gateway: &Gateway,
    partner_id: &str,
    request: &ImageUploadRequest,
) -> Result<SignedUpload> {
    resource::create(gateway, RESOURCE, request, scoped(partner_id, None)).await
}

/// `PATCH images/status`
pub async fn update_status(gateway: &Gateway, partner_id: &str, update: &ImageStatusUpdate) -> Result<Image> {
    resource::update(gateway, RESOURCE, "status", update, scoped(partner_id, None)).await
}
