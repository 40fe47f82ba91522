//! # Partner Admin Client - Library Root
//!
//! Headless client for the partner catalog REST API: stores, products,
//! variants, prices, inventory, images and storefront hero banners.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              partner-admin (this crate)                │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - containers, context, dialogs, flows       │
//! │  services  - Gateway, error classifier, HTTP, identity │
//! │  core      - error types and service traits            │
//! │  debug     - logging and task tracking                 │
//! │  utils     - draft validation                          │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP/JSON (Bearer)           │ HTTPS
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Partner API    │          │  Identity provider /    │
//! │  {base}/{domain}│          │  signed storage URLs    │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Dependency Graph
//!
//! ```text
//! app ──► services ──► core
//!  │         │
//!  └─► utils └─► shared, lib-auth, lib-core, lib-utils
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
