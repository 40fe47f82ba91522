//! # Image Upload Flow
//!
//! Batch upload with per-file isolation. Every file gets a placeholder row
//! in the [`Images`] container right away (its `url` is a data-URL preview)
//! plus an entry in the pending side table. Each file then runs
//!
//! ```text
//! POST images ──► PUT {signed url} ──► PATCH images/status (ACTIVE)
//! ```
//!
//! on its own. Success swaps the placeholder for the server image; failure
//! drops the placeholder and records a per-file error. Siblings are not
//! affected by each other's failures.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use lib_utils::b64_encode;
use parking_lot::Mutex;
use shared::{Image, ImageStatus, ImageStatusUpdate, ImageUploadRequest};

use super::catalog::require;
use crate::app::collections::{Images, PLACEHOLDER_PREFIX};
use crate::app::container::EntityContainer;
use crate::core::error::{AppError, Result};
use crate::core::service::BlobUploader;
use crate::services::api::{images, Gateway};

/// Largest file accepted, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// One file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A file whose upload has not finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    pub uploaded: Vec<Image>,
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives image uploads into an [`Images`] container.
#[derive(Clone)]
pub struct ImageUploader {
    gateway: Gateway,
    blobs: Arc<dyn BlobUploader>,
    images: EntityContainer<Images>,
    pending: Arc<Mutex<HashMap<String, PendingUpload>>>,
    errors: Arc<Mutex<HashMap<String, String>>>,
}

impl std::fmt::Debug for ImageUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUploader")
            .field("pending", &self.pending.lock().len())
            .field("errors", &self.errors.lock().len())
            .finish_non_exhaustive()
    }
}

impl ImageUploader {
    pub fn new(gateway: Gateway, blobs: Arc<dyn BlobUploader>, images: EntityContainer<Images>) -> Self {
        Self {
            gateway,
            blobs,
            images,
            pending: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Uploads in progress, keyed by placeholder id.
    pub fn pending(&self) -> HashMap<String, PendingUpload> {
        self.pending.lock().clone()
    }

    /// Last error per file name.
    pub fn file_errors(&self) -> HashMap<String, String> {
        self.errors.lock().clone()
    }

    pub fn clear_errors(&self) {
        self.errors.lock().clear();
    }

    /// Upload `files` concurrently. Individual failures land in the report.
    #[tracing::instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_batch(&self, partner_id: &str, files: Vec<UploadFile>) -> Result<UploadReport> {
        require(partner_id, "Partner id")?;

        let mut report = UploadReport::default();
        let mut accepted = Vec::with_capacity(files.len());
        for file in files {
            match check_file(&file) {
                Ok(()) => accepted.push(file),
                Err(err) => report.failed.push(self.record_failure(&file.file_name, &err)),
            }
        }

        let uploads = accepted.into_iter().map(|file| {
            let placeholder_id = self.add_placeholder(&file);
            self.upload_one(partner_id, placeholder_id, file)
        });

        for outcome in join_all(uploads).await {
            match outcome {
                Ok(image) => report.uploaded.push(image),
                Err(failure) => report.failed.push(failure),
            }
        }

        tracing::info!(
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Image batch finished"
        );
        Ok(report)
    }

    fn add_placeholder(&self, file: &UploadFile) -> String {
        let placeholder_id = format!("{PLACEHOLDER_PREFIX}{}", uuid::Uuid::new_v4());
        let preview = format!("data:{};base64,{}", file.content_type, b64_encode(&file.bytes));

        self.pending.lock().insert(
            placeholder_id.clone(),
            PendingUpload {
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
                size: file.bytes.len(),
            },
        );
        self.errors.lock().remove(&file.file_name);
        self.images.insert_local(Image {
            id: placeholder_id.clone(),
            url: preview,
            file_name: file.file_name.clone(),
            content_type: Some(file.content_type.clone()),
            status: ImageStatus::Pending,
            ..Default::default()
        });
        placeholder_id
    }

    async fn upload_one(
        &self,
        partner_id: &str,
        placeholder_id: String,
        file: UploadFile,
    ) -> std::result::Result<Image, UploadFailure> {
        let file_name = file.file_name.clone();
        let outcome = self.transfer(partner_id, file).await;
        self.pending.lock().remove(&placeholder_id);

        match outcome {
            Ok(image) => {
                // A reload may have dropped the placeholder meanwhile
                if !self.images.replace_local(&placeholder_id, image.clone())
                    && !self.images.replace_local(&image.id, image.clone())
                {
                    tracing::debug!(placeholder = %placeholder_id, image_id = %image.id, "Placeholder gone, inserting uploaded image");
                    self.images.insert_local(image.clone());
                }
                Ok(image)
            }
            Err(err) => {
                self.images.remove(&placeholder_id);
                Err(self.record_failure(&file_name, &err))
            }
        }
    }

    async fn transfer(&self, partner_id: &str, file: UploadFile) -> Result<Image> {
        let request = ImageUploadRequest {
            file_name: file.file_name,
            content_type: file.content_type.clone(),
            size: file.bytes.len() as u64,
        };
        let signed = images::request_upload(&self.gateway, partner_id, &request).await?;

        self.blobs
            .put(&signed.upload_url, file.bytes, &file.content_type)
            .await?;

        let update = ImageStatusUpdate {
            image_id: signed.image.id.clone(),
            status: ImageStatus::Active,
        };
        images::update_status(&self.gateway, partner_id, &update).await
    }

    fn record_failure(&self, file_name: &str, err: &AppError) -> UploadFailure {
        let error = match err {
            AppError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        };
        tracing::warn!(file_name = %file_name, error = %error, "Image upload failed");
        self.errors.lock().insert(file_name.to_string(), error.clone());
        UploadFailure {
            file_name: file_name.to_string(),
            error,
        }
    }
}

fn check_file(file: &UploadFile) -> Result<()> {
    if !file.content_type.starts_with("image/") {
        return Err(AppError::Validation(format!(
            "{} is not an image ({})",
            file.file_name, file.content_type
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::Validation(format!("{} is empty", file.file_name)));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "{} exceeds the {} MB limit",
            file.file_name,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::container::{Paging, Scope};
    use crate::test_support::{gateway_with, MockTransport, MockUploader};
    use serde_json::json;

    fn file(name: &str) -> UploadFile {
        UploadFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    fn signed(id: &str) -> serde_json::Value {
        json!({ "data": {
            "uploadUrl": format!("https://storage.example.com/{id}?sig=abc"),
            "image": { "id": id, "status": "PENDING" }
        } })
    }

    fn active(id: &str) -> serde_json::Value {
        json!({ "data": { "id": id, "url": format!("https://cdn.example.com/{id}.png"), "status": "ACTIVE" } })
    }

    fn uploader(transport: &MockTransport, blobs: &MockUploader) -> ImageUploader {
        let gateway = gateway_with(transport);
        let images = EntityContainer::<Images>::new(gateway.clone(), Paging::default());
        ImageUploader::new(gateway, Arc::new(blobs.clone()), images)
    }

    #[tokio::test]
    async fn test_successful_upload_swaps_placeholder() {
        let transport = MockTransport::new();
        transport.reply(signed("img-1"));
        transport.reply(active("img-1"));
        let blobs = MockUploader::new();
        let uploader = uploader(&transport, &blobs);

        let report = uploader.upload_batch("p-1", vec![file("a.png")]).await.unwrap();

        assert!(report.is_complete_success());
        assert_eq!(report.uploaded[0].id, "img-1");
        let items = uploader.images.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "img-1");
        assert_eq!(items[0].status, ImageStatus::Active);
        assert!(uploader.pending().is_empty());

        let puts = blobs.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "https://storage.example.com/img-1?sig=abc");
        let calls = transport.calls();
        assert_eq!(calls[1].path, "images/status");
        assert_eq!(calls[1].body, Some(json!({ "imageId": "img-1", "status": "ACTIVE" })));
    }

    #[tokio::test]
    async fn test_failed_file_isolated_from_siblings() {
        let transport = MockTransport::new();
        transport.reply(signed("img-1"));
        transport.reply(signed("img-2"));
        transport.reply(active("img-2"));
        let blobs = MockUploader::new();
        blobs.fail_url("https://storage.example.com/img-1?sig=abc");
        let uploader = uploader(&transport, &blobs);

        let report = uploader
            .upload_batch("p-1", vec![file("broken.png"), file("ok.png")])
            .await
            .unwrap();

        assert_eq!(report.uploaded.len(), 1);
        assert_eq!(report.uploaded[0].id, "img-2");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "broken.png");
        assert!(uploader.file_errors().contains_key("broken.png"));

        let ids: Vec<_> = uploader.images.items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["img-2"]);
        assert!(uploader.images.placeholders().is_empty());
        assert!(uploader.pending().is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_visible_while_uploading() {
        let transport = MockTransport::new();
        let gate = transport.gated();
        let blobs = MockUploader::new();
        let uploader = uploader(&transport, &blobs);

        let task = {
            let uploader = uploader.clone();
            tokio::spawn(async move { uploader.upload_batch("p-1", vec![file("a.png")]).await })
        };
        transport.wait_for_calls(1).await;

        let placeholders = uploader.images.placeholders();
        assert_eq!(placeholders.len(), 1);
        assert!(placeholders[0].url.starts_with("data:image/png;base64,"));
        assert_eq!(uploader.pending().len(), 1);

        gate.send(Err(crate::core::error::TransportError::Status {
            status: 500,
            body: String::new(),
        }))
        .unwrap();
        let report = task.await.unwrap().unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].error, "The server encountered an error. Please try again later.");
        assert!(uploader.images.items().is_empty());
    }

    async fn upload_across_reload(reloaded: serde_json::Value) -> ImageUploader {
        let transport = MockTransport::new();
        let gate = transport.gated();
        transport.reply(json!({ "data": reloaded }));
        transport.reply(active("img-1"));
        let blobs = MockUploader::new();
        let uploader = uploader(&transport, &blobs);

        let task = {
            let uploader = uploader.clone();
            tokio::spawn(async move { uploader.upload_batch("p-1", vec![file("a.png")]).await })
        };
        transport.wait_for_calls(1).await;
        uploader.images.fetch(&Scope::partner("p-1")).await.unwrap();
        assert!(uploader.images.placeholders().is_empty());

        gate.send(Ok(signed("img-1"))).unwrap();
        let report = task.await.unwrap().unwrap();
        assert_eq!(report.uploaded.len(), 1);
        uploader
    }

    #[tokio::test]
    async fn test_upload_survives_reload_that_dropped_placeholder() {
        let uploader = upload_across_reload(json!([])).await;

        let items = uploader.images.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "img-1");
        assert_eq!(items[0].status, ImageStatus::Active);
    }

    #[tokio::test]
    async fn test_upload_after_reload_updates_existing_row() {
        let uploader = upload_across_reload(json!([{ "id": "img-1", "status": "PENDING" }])).await;

        let items = uploader.images.items();
        assert_eq!(items.len(), 1, "no duplicate row");
        assert_eq!(items[0].status, ImageStatus::Active);
    }

    #[tokio::test]
    async fn test_non_image_rejected_without_request() {
        let transport = MockTransport::new();
        let blobs = MockUploader::new();
        let uploader = uploader(&transport, &blobs);

        let mut doc = file("notes.txt");
        doc.content_type = "text/plain".into();
        let report = uploader.upload_batch("p-1", vec![doc]).await.unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(transport.call_count(), 0);
        assert!(uploader.images.items().is_empty());
    }
}
