//! # Dialog Flows
//!
//! Mutation sequences run from dialogs. Flows talk to the Gateway only; they
//! never touch a container directly (except the image uploader, which owns
//! the placeholder rows). The page decides whether to refetch or remove
//! based on the [`DialogResult`](crate::app::dialog::DialogResult).
//!
//! - [`catalog`]: stores, products, variants, prices, inventory, generic delete
//! - [`hero`]: storefront hero banners
//! - [`image_upload`]: batch image upload with placeholders
//! - [`auth`]: admin sign-up and sign-out

pub mod auth;
pub mod catalog;
pub mod hero;
pub mod image_upload;

pub use auth::{AdminAuth, SignedIn};
pub use image_upload::{ImageUploader, UploadFailure, UploadFile, UploadReport};
