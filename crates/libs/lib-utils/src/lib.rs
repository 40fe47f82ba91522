//! # Utilities Library
//!
//! Shared utility functions for base64 encoding, environment variables, time, and validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64_encode, b64u_decode, b64u_decode_to_string, b64u_encode};
pub use envs::{get_env, get_env_flag, get_env_or, get_env_parse};
pub use time::now_utc;
pub use validation::{validate_max_length, validate_min_length, validate_not_empty};
