//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the partner admin client and the
//! partner REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: Response envelope and list payload normalization
//!   - **[`dto::catalog`]**: Stores, products, variants, prices, inventory
//!   - **[`dto::media`]**: Images and storefront hero banners
//!   - **[`dto::auth`]**: Sign-up and token exchange
//! - **[`utils`]**: Wire codecs shared by the DTOs
//!   - **[`utils::metadata_string`]**: Metadata objects carried as JSON-encoded strings
//!
//! ## Wire Format
//!
//! - Field names are **camelCase** on the wire (`partnerId`, `createdAt`)
//! - Every reply is wrapped in `{ "data": ..., "message": ..., "timestamp": ... }`
//! - List replies carry either a bare array or a paged `{ "content": [...] }` object
//! - Metadata is a JSON object on the Rust side and a JSON string on the wire (`"{}"` when empty)
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::envelope::{ApiResponse, ListPayload};
//! use shared::dto::catalog::Store;
//!
//! let body = r#"{"data":{"content":[{"id":"s-1","name":"Main"}]},"message":"ok"}"#;
//! let reply: ApiResponse<ListPayload<Store>> = serde_json::from_str(body).unwrap();
//! let stores = reply.data.into_items();
//! assert_eq!(stores[0].name, "Main");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
