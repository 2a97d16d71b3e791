//! Build and parse entry points
//!
//! [`Hpp`] holds the shared secret and drives one build-or-parse cycle:
//! outbound, defaults are filled, the signature is computed and the record
//! validated before serialization; inbound, the payload is decoded into a
//! typed record and its signature recomputed and compared before the record
//! is handed to the caller.

use serde_json::{Map, Value};

use hpp_core::{fields, validate_request, Request, Response};

use crate::codec::{decode_values, encode_values};
use crate::error::{HppError, WireError};
use crate::hash::{constant_time_compare, request_signature, response_signature};

/// How string values travel on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireMode {
    /// Every value Base64-encoded. This is the gateway's behavior.
    #[default]
    Base64,
    /// Plain JSON strings.
    Plain,
}

/// A stateless HPP endpoint bound to one shared secret.
///
/// The secret is held only in memory and never serialized.
#[derive(Debug, Clone)]
pub struct Hpp {
    secret: String,
    mode: WireMode,
}

impl Hpp {
    /// Endpoint in Base64 wire mode.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_mode(secret, WireMode::default())
    }

    pub fn with_mode(secret: impl Into<String>, mode: WireMode) -> Self {
        Self {
            secret: secret.into(),
            mode,
        }
    }

    /// Build the wire bytes for an outbound request.
    ///
    /// Fills the timestamp and order ID when blank, computes the signature,
    /// validates every field and serializes. The caller's record is taken by
    /// value; the returned bytes are the finished payload.
    ///
    /// # Errors
    ///
    /// `HppError::Validation` when the record violates the rule table;
    /// `HppError::Wire` when it cannot be serialized.
    pub fn request_to_json(&self, mut request: Request) -> Result<Vec<u8>, HppError> {
        request.generate_defaults();
        request.hash = request_signature(&request, &self.secret);

        validate_request(&request)?;
        check_supplementary_keys(&request.supplementary_data)?;

        let payload = to_wire_object(&request)?;
        self.serialize(payload)
    }

    /// Build the wire bytes for a response.
    ///
    /// Computes and embeds the signature. Exists for the receiving side of
    /// round-trip tests and gateway simulators; production responses come
    /// from the gateway itself.
    ///
    /// # Errors
    ///
    /// `HppError::Wire` when the record cannot be serialized.
    pub fn response_to_json(&self, mut response: Response) -> Result<Vec<u8>, HppError> {
        response.hash = response_signature(&response, &self.secret);
        check_supplementary_keys(&response.supplementary_data)?;

        let payload = to_wire_object(&response)?;
        self.serialize(payload)
    }

    /// Parse and signature-check an inbound response.
    ///
    /// # Errors
    ///
    /// `WireError::Json`/`Base64`/`Utf8` when the payload is malformed — no
    /// partial record is returned; `WireError::SignatureMismatch` when the
    /// received signature does not match the recomputed expectation — the
    /// response must be rejected.
    pub fn response_from_json(&self, data: &[u8]) -> Result<Response, HppError> {
        let value: Value = serde_json::from_slice(data).map_err(WireError::Json)?;
        let mut payload = match value {
            Value::Object(map) => map,
            _ => {
                return Err(WireError::Malformed("expected a JSON object".to_string()).into());
            }
        };

        if self.mode == WireMode::Base64 {
            decode_values(&mut payload)?;
        }

        let response: Response =
            serde_json::from_value(Value::Object(payload)).map_err(WireError::Json)?;

        let expected = response_signature(&response, &self.secret);
        if !constant_time_compare(&expected, &response.hash) {
            return Err(WireError::SignatureMismatch {
                expected,
                received: response.hash,
            }
            .into());
        }

        Ok(response)
    }

    fn serialize(&self, mut payload: Map<String, Value>) -> Result<Vec<u8>, HppError> {
        if self.mode == WireMode::Base64 {
            encode_values(&mut payload)?;
        }

        serde_json::to_vec(&Value::Object(payload))
            .map_err(|e| WireError::Json(e).into())
    }
}

fn to_wire_object<T: serde::Serialize>(record: &T) -> Result<Map<String, Value>, HppError> {
    match serde_json::to_value(record).map_err(WireError::Json)? {
        Value::Object(map) => Ok(map),
        _ => Err(WireError::Malformed("expected a JSON object".to_string()).into()),
    }
}

// The supplementary bag must never shadow a named field; a collision would
// put two values under one wire key.
fn check_supplementary_keys(
    supplementary_data: &std::collections::BTreeMap<String, String>,
) -> Result<(), HppError> {
    for key in supplementary_data.keys() {
        if fields::is_named_field(key) {
            return Err(WireError::Encoding {
                field: key.clone(),
                reason: "supplementary data key collides with a named field".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hpp_core::Flag;
    use pretty_assertions::assert_eq;

    fn basic_request() -> Request {
        Request {
            merchant_id: "thestore".to_string(),
            order_id: "ORD453-11".to_string(),
            amount: 29900,
            currency: "EUR".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2013, 8, 14, 12, 22, 39).unwrap()),
            ..Request::default()
        }
    }

    #[test]
    fn test_request_to_json_embeds_signature() {
        let hpp = Hpp::with_mode("mysecret", WireMode::Plain);
        let bytes = hpp.request_to_json(basic_request()).unwrap();

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value["SHA1HASH"],
            "cc72c08e529b3bc153481eda9533b815cef29de3"
        );
        assert_eq!(value["MERCHANT_ID"], "thestore");
        assert_eq!(value["AMOUNT"], "29900");
        assert_eq!(value["TIMESTAMP"], "20130814122239");
    }

    #[test]
    fn test_request_to_json_base64_mode() {
        let hpp = Hpp::new("mysecret");
        let bytes = hpp.request_to_json(basic_request()).unwrap();

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["MERCHANT_ID"], "dGhlc3RvcmU=");
        assert_eq!(value["TIMESTAMP"], "MjAxMzA4MTQxMjIyMzk=");
    }

    #[test]
    fn test_request_to_json_fills_defaults() {
        let hpp = Hpp::with_mode("mysecret", WireMode::Plain);
        let request = Request {
            merchant_id: "thestore".to_string(),
            amount: 100,
            currency: "EUR".to_string(),
            ..Request::default()
        };

        let bytes = hpp.request_to_json(request).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["ORDER_ID"].as_str().unwrap().len(), 36);
        assert_eq!(value["TIMESTAMP"].as_str().unwrap().len(), 14);
    }

    #[test]
    fn test_request_to_json_rejects_invalid_fields() {
        let hpp = Hpp::new("mysecret");
        let request = Request {
            merchant_id: "test".to_string(),
            order_id: "test%".to_string(),
            amount: 100,
            ..Request::default()
        };

        let err = hpp.request_to_json(request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to validate HPP request: ORDER_ID: Order ID must only contain alphanumeric characters, dash and underscore."
        );
    }

    #[test]
    fn test_request_to_json_rejects_supplementary_collision() {
        let hpp = Hpp::new("mysecret");
        let mut request = basic_request();
        request
            .supplementary_data
            .insert("MERCHANT_ID".to_string(), "other".to_string());

        let err = hpp.request_to_json(request).unwrap_err();
        assert!(matches!(
            err,
            HppError::Wire(WireError::Encoding { ref field, .. }) if field == "MERCHANT_ID"
        ));
    }

    #[test]
    fn test_response_round_trip() {
        let hpp = Hpp::new("mysecret");
        let mut response = Response {
            merchant_id: "thestore".to_string(),
            account: "myAccount".to_string(),
            order_id: "ORD453-11".to_string(),
            amount: 100,
            auth_code: "79347".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2013, 8, 14, 12, 22, 39).unwrap()),
            result: "00".to_string(),
            message: "Successful".to_string(),
            cvn_result: "1".to_string(),
            pas_ref: "3737468273643".to_string(),
            batch_id: "654321".to_string(),
            eci: "1".to_string(),
            cavv: "123".to_string(),
            xid: "654564564".to_string(),
            ..Response::default()
        };
        response
            .tss
            .insert("TSS_1".to_string(), "TSS_1_VALUE".to_string());
        response
            .supplementary_data
            .insert("UNKNOWN_1".to_string(), "Unknown value 1".to_string());

        let bytes = hpp.response_to_json(response.clone()).unwrap();
        let parsed = hpp.response_from_json(&bytes).unwrap();

        assert_eq!(parsed.hash, "f093a0b233daa15f2bf44888f4fe75cb652e7bf0");
        response.hash = parsed.hash.clone();
        assert_eq!(parsed, response);
    }

    #[test]
    fn test_response_from_json_rejects_invalid_json() {
        let hpp = Hpp::new("mysecret");
        let err = hpp.response_from_json(b"invalid").unwrap_err();
        assert!(matches!(err, HppError::Wire(WireError::Json(_))));

        let err = hpp.response_from_json(b"\"aGk=\"").unwrap_err();
        assert!(matches!(err, HppError::Wire(WireError::Malformed(_))));
    }

    #[test]
    fn test_response_from_json_rejects_mismatched_signature() {
        let hpp = Hpp::new("mysecret");
        // "dGVzdA==" is "test", "VEVTVA==" is "TEST".
        let err = hpp
            .response_from_json(br#"{"ACCOUNT": "dGVzdA==", "SHA1HASH": "VEVTVA=="}"#)
            .unwrap_err();

        match err {
            HppError::Wire(WireError::SignatureMismatch { expected, received }) => {
                assert_eq!(expected, "aca0089a38f647d3dae1c1fae9fa0a1c642151f0");
                assert_eq!(received, "TEST");
            }
            other => panic!("expected a signature mismatch, got {other:?}"),
        }
        assert_eq!(
            Hpp::new("mysecret")
                .response_from_json(br#"{"SHA1HASH": "VEVTVA=="}"#)
                .unwrap_err()
                .to_string(),
            "secret does not match expected: expected hash aca0089a38f647d3dae1c1fae9fa0a1c642151f0 received TEST"
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let response = Response {
            merchant_id: "thestore".to_string(),
            ..Response::default()
        };
        let bytes = Hpp::new("mysecret").response_to_json(response).unwrap();

        let err = Hpp::new("othersecret").response_from_json(&bytes).unwrap_err();
        assert!(matches!(
            err,
            HppError::Wire(WireError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_card_storage_request_signature() {
        let hpp = Hpp::with_mode("mysecret", WireMode::Plain);
        let request = Request {
            enable_card_storage: Flag::On,
            payer_reference: "newpayer1".to_string(),
            payment_reference: "mycard1".to_string(),
            ..basic_request()
        };

        let bytes = hpp.request_to_json(request).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value["SHA1HASH"],
            "4106afc4666c6145b623089b1ad4098846badba2"
        );
    }
}
