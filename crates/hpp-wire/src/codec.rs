//! Base64 transport coding for wire values
//!
//! In encoded mode every top-level string value is Base64 (standard
//! alphabet, padded), as is each string inside object-valued fields such as
//! the TSS map. Keys are never encoded. Malformed Base64 or a decode that
//! is not UTF-8 text is a hard parse failure naming the field.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Value};

use crate::error::WireError;

/// Base64-encode every value of a flat wire payload in place.
///
/// # Errors
///
/// Returns `WireError::Encoding` when a value is neither a string nor an
/// object of strings.
pub fn encode_values(payload: &mut Map<String, Value>) -> Result<(), WireError> {
    for (key, value) in payload.iter_mut() {
        match value {
            Value::String(s) => *s = BASE64.encode(s.as_bytes()),
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested.iter_mut() {
                    match nested_value {
                        Value::String(s) => *s = BASE64.encode(s.as_bytes()),
                        _ => {
                            return Err(WireError::Encoding {
                                field: format!("{key}.{nested_key}"),
                                reason: "only string values can be transported".to_string(),
                            })
                        }
                    }
                }
            }
            _ => {
                return Err(WireError::Encoding {
                    field: key.clone(),
                    reason: "only string and object values can be transported".to_string(),
                })
            }
        }
    }

    Ok(())
}

/// Reverse of [`encode_values`]: Base64-decode every value in place.
///
/// # Errors
///
/// Returns `WireError::Base64` on malformed Base64, `WireError::Utf8` when
/// the decoded bytes are not UTF-8 text, and `WireError::Encoding` for
/// value shapes the wire format does not carry.
pub fn decode_values(payload: &mut Map<String, Value>) -> Result<(), WireError> {
    for (key, value) in payload.iter_mut() {
        match value {
            Value::String(s) => *s = decode_one(key, s)?,
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested.iter_mut() {
                    match nested_value {
                        Value::String(s) => {
                            *s = decode_one(&format!("{key}.{nested_key}"), s)?;
                        }
                        _ => {
                            return Err(WireError::Encoding {
                                field: format!("{key}.{nested_key}"),
                                reason: "only string values can be transported".to_string(),
                            })
                        }
                    }
                }
            }
            _ => {
                return Err(WireError::Encoding {
                    field: key.clone(),
                    reason: "only string and object values can be transported".to_string(),
                })
            }
        }
    }

    Ok(())
}

fn decode_one(field: &str, encoded: &str) -> Result<String, WireError> {
    let bytes = BASE64.decode(encoded).map_err(|source| WireError::Base64 {
        field: field.to_string(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| WireError::Utf8 {
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_encode_top_level_strings() {
        let mut payload = as_map(json!({"MERCHANT_ID": "thestore", "AMOUNT": "29900"}));
        encode_values(&mut payload).unwrap();

        assert_eq!(payload["MERCHANT_ID"], "dGhlc3RvcmU=");
        assert_eq!(payload["AMOUNT"], "Mjk5MDA=");
    }

    #[test]
    fn test_encode_nested_object_strings() {
        let mut payload = as_map(json!({"TSS": {"TSS_1": "TSS_1_VALUE"}}));
        encode_values(&mut payload).unwrap();

        assert_eq!(payload["TSS"]["TSS_1"], "VFNTXzFfVkFMVUU=");
    }

    #[test]
    fn test_encode_empty_string_stays_empty() {
        let mut payload = as_map(json!({"CURRENCY": ""}));
        encode_values(&mut payload).unwrap();
        assert_eq!(payload["CURRENCY"], "");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let original = as_map(json!({
            "MERCHANT_ID": "thestore",
            "COMMENT1": "a-z £ $ €",
            "TSS": {"TSS_1": "TSS_1_VALUE"}
        }));

        let mut payload = original.clone();
        encode_values(&mut payload).unwrap();
        decode_values(&mut payload).unwrap();

        assert_eq!(payload, original);
    }

    #[test]
    fn test_decode_rejects_malformed_base64() {
        let mut payload = as_map(json!({"MERCHANT_ID": "TEST@"}));
        let err = decode_values(&mut payload).unwrap_err();

        assert!(matches!(err, WireError::Base64 { ref field, .. } if field == "MERCHANT_ID"));
    }

    #[test]
    fn test_decode_rejects_malformed_nested_base64() {
        let mut payload = as_map(json!({"TSS": {"TEST": "TEST@"}}));
        let err = decode_values(&mut payload).unwrap_err();

        assert!(matches!(err, WireError::Base64 { ref field, .. } if field == "TSS.TEST"));
    }

    #[test]
    fn test_decode_rejects_non_text_payload() {
        // Valid Base64, but the decoded bytes are not UTF-8.
        let mut payload = as_map(json!({"MERCHANT_ID": "/w=="}));
        let err = decode_values(&mut payload).unwrap_err();

        assert!(matches!(err, WireError::Utf8 { ref field } if field == "MERCHANT_ID"));
    }

    #[test]
    fn test_unsupported_value_shape_names_field() {
        let mut payload = as_map(json!({"AMOUNT": 100}));
        let err = encode_values(&mut payload).unwrap_err();
        assert!(matches!(err, WireError::Encoding { ref field, .. } if field == "AMOUNT"));

        let mut payload = as_map(json!({"TSS": {"TSS_1": 7}}));
        let err = decode_values(&mut payload).unwrap_err();
        assert!(matches!(err, WireError::Encoding { ref field, .. } if field == "TSS.TSS_1"));
    }
}
