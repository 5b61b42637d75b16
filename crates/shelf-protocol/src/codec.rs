//! JSON codec for request and response payloads.
//!
//! Shelf uses two metadata shapes:
//!
//! | Shape | Example | Decoder |
//! |-------|---------|---------|
//! | Single property | `{"name":"version","value":"1.5","immutable":false}` | [`decode_single`] |
//! | Bulk map | `{"version":{"value":"1.5","immutable":false}}` | [`decode_bulk`] |
//!
//! In the bulk shape the map key is the property name; a `name` field inside
//! an entry is ignored.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Metadata, MetadataProperty, PropertyName, ShelfError};

/// One value of the bulk metadata map.
#[derive(Debug, Deserialize)]
struct BulkEntry {
    value: String,
    immutable: bool,
}

/// Serialises a request payload to JSON.
///
/// # Errors
///
/// Returns [`ShelfError::Encoding`] if `value` cannot be represented as JSON.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, ShelfError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| ShelfError::encoding(e.to_string()))
}

/// Decodes a single metadata property.
///
/// # Errors
///
/// Returns [`ShelfError::Decoding`] if the body is not an object with a
/// non-empty string `name`, a string `value` and a boolean `immutable`.
pub fn decode_single(body: &[u8]) -> Result<MetadataProperty, ShelfError> {
    serde_json::from_slice(body)
        .map_err(|e| ShelfError::decoding(format!("invalid metadata property: {}", e)))
}

/// Decodes a bulk metadata map.
///
/// # Errors
///
/// Returns [`ShelfError::Decoding`] if the body is not a JSON object, or if
/// any entry lacks a string `value` or boolean `immutable`. The message names
/// the first key that failed.
pub fn decode_bulk(body: &[u8]) -> Result<Metadata, ShelfError> {
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)
        .map_err(|e| ShelfError::decoding(format!("invalid metadata map: {}", e)))?;

    let mut metadata = Metadata::new();
    for (key, value) in entries {
        let name = PropertyName::new(key.as_str())
            .ok_or_else(|| ShelfError::decoding("metadata map contains an empty key"))?;
        let entry: BulkEntry = serde_json::from_value(value).map_err(|e| {
            ShelfError::decoding(format!("invalid metadata property '{}': {}", key, e))
        })?;
        metadata.insert(
            name.clone(),
            MetadataProperty::new(name, entry.value, entry.immutable),
        );
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> PropertyName {
        PropertyName::new(value).unwrap()
    }

    #[test]
    fn test_decode_bulk() {
        let body = br#"{"version":{"value":"1.5","immutable":false},"build":{"value":"10","immutable":false}}"#;
        let metadata = decode_bulk(body).unwrap();

        assert_eq!(metadata.len(), 2);
        assert_eq!(
            metadata["version"],
            MetadataProperty::new(name("version"), "1.5", false)
        );
        assert_eq!(
            metadata["build"],
            MetadataProperty::new(name("build"), "10", false)
        );
    }

    #[test]
    fn test_decode_bulk_key_overrides_inner_name() {
        let body = br#"{"version":{"name":"other","value":"1.5","immutable":true}}"#;
        let metadata = decode_bulk(body).unwrap();
        assert_eq!(metadata["version"].name.as_str(), "version");
        assert!(metadata["version"].immutable);
    }

    #[test]
    fn test_decode_bulk_names_failing_key() {
        let body = br#"{"version":{"value":"1.5","immutable":false},"build":{"value":10}}"#;
        let err = decode_bulk(body).unwrap_err();

        assert_eq!(err.code(), "decoding_error");
        assert!(err.to_string().contains("'build'"), "{}", err);
    }

    #[test]
    fn test_decode_bulk_rejects_non_object() {
        assert!(decode_bulk(b"[]").is_err());
        assert!(decode_bulk(b"").is_err());
        assert!(decode_bulk(br#"{"":{"value":"x","immutable":false}}"#).is_err());
    }

    #[test]
    fn test_decode_bulk_empty_object() {
        assert!(decode_bulk(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_single_round_trip() {
        let property = MetadataProperty::new(name("x"), "y", true);
        let encoded = encode(&property).unwrap();
        let decoded = decode_single(&encoded).unwrap();

        assert_eq!(decoded.name.as_str(), "x");
        assert_eq!(decoded.value, "y");
        assert!(decoded.immutable);
    }

    #[test]
    fn test_decode_single_rejects_bad_fields() {
        let cases: [&[u8]; 5] = [
            br#"{"value":"1.5","immutable":false}"#,
            br#"{"name":"version","immutable":false}"#,
            br#"{"name":"version","value":1.5,"immutable":false}"#,
            br#"{"name":"version","value":"1.5","immutable":"no"}"#,
            br#"{"name":"","value":"1.5","immutable":false}"#,
        ];

        for body in cases {
            let err = decode_single(body).unwrap_err();
            assert!(matches!(err, ShelfError::Decoding { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_bulk_encode_is_accepted_by_decoder() {
        let metadata = crate::metadata_from([
            MetadataProperty::new(name("version"), "1.5", false),
            MetadataProperty::new(name("build"), "10", false),
        ]);

        let encoded = encode(&metadata).unwrap();
        assert_eq!(decode_bulk(&encoded).unwrap(), metadata);
    }
}
