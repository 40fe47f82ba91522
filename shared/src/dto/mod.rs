//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the partner REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - `ApiResponse<T>`, `Page<T>`, `ListPayload<T>`
//! - [`catalog`] - Store, product, variant, price and inventory records and drafts
//! - [`media`] - Image and hero banner records, signed upload DTOs
//! - [`auth`] - Sign-up, custom token and admin token DTOs
//!
//! ## Embedded References
//!
//! Relationships are by-value snapshots. A `Variant` carries a `ProductRef`
//! which itself carries a `StoreRef`; updating the store does not update the
//! copy embedded in an already-loaded variant until the next fetch.
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /api/v1/variants?partnerId=p-1&productId=pr-9&page=0&size=100&sortBy=createdAt
//!
//! {
//!   "data": {
//!     "content": [
//!       {
//!         "id": "v-1",
//!         "name": "Large",
//!         "sku": "TSHIRT-L",
//!         "product": { "id": "pr-9", "name": "T-Shirt", "store": { "id": "s-1", "name": "Main" } },
//!         "metadata": "{\"color\":\"red\"}"
//!       }
//!     ],
//!     "totalElements": 1
//!   },
//!   "message": "Variants fetched",
//!   "timestamp": "2026-01-12T10:00:00Z"
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod envelope;
pub mod media;

pub use auth::*;
pub use catalog::*;
pub use envelope::*;
pub use media::*;
