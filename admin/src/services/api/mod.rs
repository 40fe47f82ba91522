//! # Partner API Module
//!
//! Everything that talks to the partner REST API goes through the
//! [`Gateway`]; failures pass through the [`ErrorClassifier`] once.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports
//! ├── gateway.rs    - Gateway verbs, RequestOptions, envelope unwrapping
//! ├── classifier.rs - Error classification and banner publishing
//! ├── messages.rs   - Localized message tables
//! ├── resource.rs   - Generic get / create / update / delete / attach
//! ├── stores.rs     - Store endpoints
//! ├── products.rs   - Product endpoints and store association
//! ├── variants.rs   - Variant endpoints and product/store association
//! ├── prices.rs     - Price endpoints and product/variant association
//! ├── inventory.rs  - Inventory endpoints
//! ├── images.rs     - Signed upload request and status activation
//! ├── heroes.rs     - Hero banner endpoints
//! └── auth.rs       - Sign-up and admin token registration
//! ```

pub mod auth;
pub mod classifier;
pub mod gateway;
pub mod heroes;
pub mod images;
pub mod inventory;
pub mod messages;
pub mod prices;
pub mod products;
pub mod resource;
pub mod stores;
pub mod variants;

pub use classifier::{ClassifiedError, ErrorClassifier, ErrorCode, RawError};
pub use gateway::{unwrap_data, Gateway, RequestOptions};
pub use prices::PriceOwner;
