//! # Shared Wire Codecs
//!
//! Metadata fields are structured JSON objects in Rust but travel as
//! JSON-encoded strings on the wire. The empty object is sent as `"{}"`,
//! never as `null`.
//!
//! ## Usage
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use shared::utils::Metadata;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(default, with = "shared::utils::metadata_string")]
//!     metadata: Metadata,
//! }
//!
//! let record: Record = serde_json::from_str(r#"{"metadata":"{\"tier\":\"gold\"}"}"#).unwrap();
//! assert_eq!(record.metadata["tier"], "gold");
//! assert_eq!(
//!     serde_json::to_string(&record).unwrap(),
//!     r#"{"metadata":"{\"tier\":\"gold\"}"}"#
//! );
//! ```

use serde_json::Value;

/// Structured metadata attached to stores, products, variants and heroes.
pub type Metadata = serde_json::Map<String, Value>;

/// Encode metadata for the wire. The empty map encodes as `"{}"`.
pub fn encode_metadata(metadata: &Metadata) -> String {
    // Serializing a Map<String, Value> cannot fail
    serde_json::to_string(metadata).unwrap_or_else(|_| "{}".to_string())
}

/// Decode a wire metadata string. Blank input decodes to the empty map.
pub fn decode_metadata(raw: &str) -> Result<Metadata, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Metadata::new());
    }
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        other => Err(serde::de::Error::custom(format!(
            "metadata must encode a JSON object, got {other}"
        ))),
    }
}

/// `#[serde(with = "...")]` adapter for metadata carried as a JSON string.
///
/// Deserialization also accepts an already-structured object and treats
/// `null` or a missing value as empty, since older endpoints are lax.
pub mod metadata_string {
    use super::{decode_metadata, encode_metadata, Metadata};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Metadata, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_metadata(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(Metadata::new()),
            Some(Value::String(raw)) => decode_metadata(&raw).map_err(D::Error::custom),
            Some(Value::Object(map)) => Ok(map),
            Some(other) => Err(D::Error::custom(format!(
                "metadata must be a JSON string or object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, with = "metadata_string")]
        metadata: Metadata,
    }

    #[test]
    fn test_empty_metadata_encodes_as_braces() {
        assert_eq!(encode_metadata(&Metadata::new()), "{}");
        let holder = Holder { metadata: Metadata::new() };
        assert_eq!(serde_json::to_value(&holder).unwrap(), json!({ "metadata": "{}" }));
    }

    #[test]
    fn test_metadata_round_trip() {
        let original = json!({
            "color": "red",
            "sizes": [1, 2, 3],
            "nested": { "featured": true, "rank": 2.5 },
            "note": null
        });
        let Value::Object(map) = original else { unreachable!() };

        let wire = serde_json::to_string(&Holder { metadata: map.clone() }).unwrap();
        let back: Holder = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.metadata, map);
    }

    #[test]
    fn test_lenient_decoding() {
        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.metadata.is_empty());

        let null: Holder = serde_json::from_value(json!({ "metadata": null })).unwrap();
        assert!(null.metadata.is_empty());

        let blank: Holder = serde_json::from_value(json!({ "metadata": "" })).unwrap();
        assert!(blank.metadata.is_empty());

        let object: Holder = serde_json::from_value(json!({ "metadata": { "a": 1 } })).unwrap();
        assert_eq!(object.metadata["a"], 1);
    }

    #[test]
    fn test_non_object_metadata_rejected() {
        assert!(decode_metadata("[1,2]").is_err());
        assert!(serde_json::from_value::<Holder>(json!({ "metadata": 5 })).is_err());
    }
}
