//! # Base64 Encoding/Decoding
//!
//! Utilities for base64 encoding and decoding.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to base64 URL-safe string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

/// Encode bytes with the standard alphabet (padded), as used in `data:` URLs.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decode base64 URL-safe string to bytes.
///
/// Trailing `=` padding is tolerated; some token issuers keep it.
pub fn b64u_decode(b64u: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(b64u.trim_end_matches('='))
        .map_err(|_| Error::FailToB64uDecode)
}

/// Decode base64 URL-safe string to UTF-8 string.
pub fn b64u_decode_to_string(b64u: &str) -> Result<String, Error> {
    b64u_decode(b64u)
        .and_then(|bytes| String::from_utf8(bytes).map_err(|_| Error::FailToB64uDecode))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64uDecode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64u_round_trip() {
        let encoded = b64u_encode(r#"{"partnerId":"p-1"}"#);
        assert!(!encoded.contains('='));
        assert_eq!(b64u_decode_to_string(&encoded).unwrap(), r#"{"partnerId":"p-1"}"#);
    }

    #[test]
    fn test_b64u_decode_tolerates_padding() {
        assert_eq!(b64u_decode("YQ==").unwrap(), b"a");
    }

    #[test]
    fn test_b64_standard_alphabet() {
        assert_eq!(b64_encode([0xfb, 0xff]), "+/8=");
        assert!(b64u_decode("not base64!").is_err());
    }
}
