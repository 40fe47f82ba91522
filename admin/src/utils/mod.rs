//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`validation`]**: Dialog input validation (emails, passwords, names, SKUs, prices)
//!
//! ## Related Modules
//!
//! - [`lib_utils`]: Cross-crate helpers (base64, env vars, length checks)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
