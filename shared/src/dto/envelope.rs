//! # Response Envelope
//!
//! Every backend reply wraps its payload in [`ApiResponse`]. List endpoints
//! are inconsistent about pagination: some return a bare array, others a
//! paged object with a `content` array. [`ListPayload`] accepts both and
//! [`ListPayload::into_items`] flattens them to the same `Vec<T>`.

use serde::{Deserialize, Serialize};

/// Standard reply wrapper: `{ data, message, timestamp }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Paged list envelope (`{ content: [...], totalElements, ... }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// List payload in either of the two shapes the API produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListPayload<T> {
    /// Bare JSON array
    Flat(Vec<T>),
    /// Paged object carrying a `content` array
    Paged(Page<T>),
}

impl<T> ListPayload<T> {
    /// Extract the rows regardless of shape.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Flat(items) => items,
            ListPayload::Paged(page) => page.content,
        }
    }

    /// Whether the payload arrived paged.
    pub fn is_paged(&self) -> bool {
        matches!(self, ListPayload::Paged(_))
    }
}
