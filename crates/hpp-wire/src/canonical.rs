//! Canonical hash-string construction
//!
//! The canonical string is the ordered, `.`-joined concatenation of the
//! signed fields. Empty fields render as empty segments, never omitted, so
//! the segment count for a given shape is fixed and both sides derive the
//! same input bytes.

use hpp_core::{Request, Response, SEPARATOR};

/// The canonical string signed into a request.
///
/// `timestamp.merchant_id.order_id.amount.currency`, extended with
/// `payer_reference.payment_reference` when card storage applies and with
/// the fraud-filter mode when one is set:
///
/// ```text
/// 20130814122239.thestore.ORD453-11.29900.EUR
/// ```
pub fn request_hash_string(request: &Request) -> String {
    let mut segments = vec![
        request.timestamp_str(),
        request.merchant_id.clone(),
        request.order_id.clone(),
        request.amount.to_string(),
        request.currency.clone(),
    ];

    if request.can_store_card() {
        segments.push(request.payer_reference.clone());
        segments.push(request.payment_reference.clone());
    }

    if !request.fraud_filter_mode.is_empty() {
        segments.push(request.fraud_filter_mode.clone());
    }

    segments.join(SEPARATOR)
}

/// The canonical string signed into a response:
/// `timestamp.merchant_id.order_id.result.message.pas_ref.auth_code`.
pub fn response_hash_string(response: &Response) -> String {
    [
        response.timestamp_str(),
        response.merchant_id.clone(),
        response.order_id.clone(),
        response.result.clone(),
        response.message.clone(),
        response.pas_ref.clone(),
        response.auth_code.clone(),
    ]
    .join(SEPARATOR)
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
    fn test_basic_request_hash_string() {
        assert_eq!(
            request_hash_string(&basic_request()),
            "20130814122239.thestore.ORD453-11.29900.EUR"
        );
    }

    #[test]
    fn test_blank_request_renders_empty_segments() {
        assert_eq!(request_hash_string(&Request::default()), "...0.");
    }

    #[test]
    fn test_card_storage_appends_payer_segments() {
        let request = Request {
            enable_card_storage: Flag::On,
            payer_reference: "newpayer1".to_string(),
            payment_reference: "mycard1".to_string(),
            ..basic_request()
        };

        assert_eq!(
            request_hash_string(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.newpayer1.mycard1"
        );
    }

    #[test]
    fn test_stored_card_selector_appends_payer_segments() {
        let request = Request {
            select_stored_card: "2b8de093-0241-4985-ad96-76ca0b26b478".to_string(),
            payer_reference: "newpayer1".to_string(),
            payment_reference: "mycard1".to_string(),
            ..basic_request()
        };

        assert_eq!(
            request_hash_string(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.newpayer1.mycard1"
        );
    }

    #[test]
    fn test_fraud_filter_mode_appends_segment() {
        let request = Request {
            fraud_filter_mode: "ACTIVE".to_string(),
            ..basic_request()
        };

        assert_eq!(
            request_hash_string(&request),
            "20130814122239.thestore.ORD453-11.29900.EUR.ACTIVE"
        );
    }

    #[test]
    fn test_response_hash_string() {
        let response = Response {
            timestamp: Some(Utc.with_ymd_and_hms(2013, 8, 14, 12, 22, 39).unwrap()),
            merchant_id: "thestore".to_string(),
            order_id: "ORD453-11".to_string(),
            result: "00".to_string(),
            message: "Successful".to_string(),
            pas_ref: "3737468273643".to_string(),
            auth_code: "79347".to_string(),
            ..Response::default()
        };

        assert_eq!(
            response_hash_string(&response),
            "20130814122239.thestore.ORD453-11.00.Successful.3737468273643.79347"
        );
    }

    #[test]
    fn test_blank_response_hash_string() {
        assert_eq!(response_hash_string(&Response::default()), "......");
    }
}
