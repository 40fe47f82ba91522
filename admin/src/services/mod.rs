//! # Services Module
//!
//! External service integrations for the partner admin client.
//!
//! ```text
//! services/
//! ├── api/         - Gateway, error classifier and per-resource endpoints
//! ├── http.rs      - reqwest transport, bare signed-URL uploader, credentials
//! └── identity.rs  - Identity provider custom-token exchange
//! ```
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Containers / Flows                          │
//! │        │                                     │
//! │        ▼                                     │
//! │  Gateway ── ErrorClassifier ── GlobalState   │
//! │        │                                     │
//! │        ▼                                     │
//! │  ReqwestTransport (Bearer, default headers)  │
//! └────────┼─────────────────────────────────────┘
//!          │ HTTP/JSON
//!          ▼
//!   Partner REST API  {base}/{domain}/...
//! ```

pub mod api;
pub mod http;
pub mod identity;

pub use api::{ErrorClassifier, Gateway, RequestOptions};
pub use http::{BareUploader, Credentials, ReqwestTransport};
pub use identity::FirebaseIdentity;
