//! # Authentication Library
//!
//! Bearer token claim decoding for the partner admin client.

pub mod token;

// Re-export commonly used types
pub use token::{decode_claims, Claims, TokenError};
