//! HPP record types
//!
//! `Request` and `Response` model one hosted-payment-page exchange. Every
//! named field is carried on the wire as a JSON string under a fixed
//! upper-case key; unrecognized keys are preserved in `supplementary_data`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gateway timestamp layout: `YYYYMMDDHHMMSS`, 14 digits, UTC.
pub const TIME_LAYOUT: &str = "%Y%m%d%H%M%S";

/// Separator joining the canonical hash-string segments.
pub const SEPARATOR: &str = ".";

/// An outbound payment request.
///
/// Callers populate the fields they need and leave the rest at their
/// defaults. `generate_defaults` fills the timestamp and order ID exactly
/// once; after that the record is treated as read-only for hashing,
/// validation and serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The merchant ID supplied by the gateway (not the bank merchant number).
    #[serde(rename = "MERCHANT_ID", default)]
    pub merchant_id: String,

    /// The sub-account to use for this transaction.
    #[serde(rename = "ACCOUNT", default)]
    pub account: String,

    /// Unique id identifying the transaction. Auto-generated when blank.
    #[serde(rename = "ORDER_ID", default)]
    pub order_id: String,

    /// Amount to authorise in the lowest unit of the currency.
    /// Must be 0 for OTB transactions (validate card only set to 1).
    #[serde(rename = "AMOUNT", default, with = "amount_format")]
    pub amount: u64,

    /// Three-letter currency code (e.g. EUR, GBP).
    #[serde(rename = "CURRENCY", default)]
    pub currency: String,

    /// Transaction date and time, `YYYYMMDDHHMMSS`. Auto-generated when absent.
    #[serde(rename = "TIMESTAMP", default, with = "timestamp_format")]
    pub timestamp: Option<DateTime<Utc>>,

    /// The two-pass SHA-1 signature over the canonical field string.
    #[serde(rename = "SHA1HASH", default)]
    pub hash: String,

    /// Whether the transaction settles in the next batch: 0, 1, on, off or multi.
    #[serde(rename = "AUTO_SETTLE_FLAG", default)]
    pub auto_settle_flag: String,

    /// A freeform comment to describe the transaction.
    #[serde(rename = "COMMENT1", default)]
    pub comment_one: String,

    /// A freeform comment to describe the transaction.
    #[serde(rename = "COMMENT2", default)]
    pub comment_two: String,

    /// Request a Transaction Suitability Score for this transaction.
    #[serde(rename = "RETURN_TSS", default)]
    pub return_tss: Flag,

    /// The postcode or ZIP of the shipping address.
    #[serde(rename = "SHIPPING_CODE", default)]
    pub shipping_code: String,

    /// The country of the shipping address.
    #[serde(rename = "SHIPPING_CO", default)]
    pub shipping_country: String,

    /// The postcode or ZIP of the billing address.
    #[serde(rename = "BILLING_CODE", default)]
    pub billing_code: String,

    /// The country of the billing address.
    #[serde(rename = "BILLING_CO", default)]
    pub billing_country: String,

    /// The customer number of the customer.
    #[serde(rename = "CUST_NUM", default)]
    pub customer_number: String,

    /// A variable reference associated with this customer.
    #[serde(rename = "VAR_REF", default)]
    pub variable_reference: String,

    /// A product id associated with this product.
    #[serde(rename = "PROD_ID", default)]
    pub product_id: String,

    /// Display language for the hosted page, two alphabetic characters.
    #[serde(rename = "HPP_LANG", default)]
    pub language: String,

    /// Text displayed on the payment button. Defaults to "Pay Now" gateway-side.
    #[serde(rename = "CARD_PAYMENT_BUTTON", default)]
    pub card_payment_button: String,

    /// Enable card storage.
    #[serde(rename = "CARD_STORAGE_ENABLE", default)]
    pub enable_card_storage: Flag,

    /// Offer to save the card.
    #[serde(rename = "OFFER_SAVE_CARD", default)]
    pub offer_save_card: Flag,

    /// The payer reference.
    #[serde(rename = "PAYER_REF", default)]
    pub payer_reference: String,

    /// The payment reference.
    #[serde(rename = "PMT_REF", default)]
    pub payment_reference: String,

    /// Whether the payer already exists: 0, 1 or 2.
    #[serde(rename = "PAYER_EXIST", default)]
    pub payer_exists: String,

    /// Identifies an OTB (card-validation-only) transaction.
    #[serde(rename = "VALIDATE_CARD_ONLY", default)]
    pub validate_card_only: Flag,

    /// Transaction-level switch for a DCC request.
    #[serde(rename = "DCC_ENABLE", default)]
    pub dcc_enable: Flag,

    /// Override of the merchant fraud-filter configuration.
    #[serde(rename = "HPP_FRAUDFILTER_MODE", default)]
    pub fraud_filter_mode: String,

    /// The HPP protocol version. Version 2 selects card management.
    #[serde(rename = "HPP_VERSION", default)]
    pub version: String,

    /// When set, the hosted page lists the payment methods saved for the payer.
    #[serde(rename = "HPP_SELECT_STORED_CARD", default)]
    pub select_stored_card: String,

    /// Unrecognized fields, passed through to the gateway verbatim.
    #[serde(flatten)]
    pub supplementary_data: BTreeMap<String, String>,
}

impl Request {
    /// Fill the timestamp and order ID when blank.
    ///
    /// Called once immediately before hashing; an order ID generated here is
    /// a hyphenated UUID v4 (36 characters) and never regenerated.
    pub fn generate_defaults(&mut self) {
        if self.timestamp.is_none() {
            self.timestamp = Some(Utc::now());
        }
        if self.order_id.is_empty() {
            self.order_id = Uuid::new_v4().to_string();
        }
    }

    /// Whether the payer/payment references participate in the signature.
    pub fn can_store_card(&self) -> bool {
        self.enable_card_storage.is_on() || !self.select_stored_card.is_empty()
    }

    /// The timestamp rendered in the gateway layout, or `""` when absent.
    pub fn timestamp_str(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.format(TIME_LAYOUT).to_string(),
            None => String::new(),
        }
    }
}

/// An inbound payment response, deserialized from gateway output.
///
/// A response is signature-checked once at parse time and not mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The merchant ID the gateway assigned.
    #[serde(rename = "MERCHANT_ID", default)]
    pub merchant_id: String,

    /// The sub-account used in the transaction.
    #[serde(rename = "ACCOUNT", default)]
    pub account: String,

    /// The order id echoed back from the request.
    #[serde(rename = "ORDER_ID", default)]
    pub order_id: String,

    /// The amount that was authorised, in the lowest unit of the currency.
    #[serde(rename = "AMOUNT", default, with = "amount_format")]
    pub amount: u64,

    /// A valid authcode when the transaction succeeded, empty otherwise.
    #[serde(rename = "AUTHCODE", default)]
    pub auth_code: String,

    /// The date and time of the transaction.
    #[serde(rename = "TIMESTAMP", default, with = "timestamp_format")]
    pub timestamp: Option<DateTime<Utc>>,

    /// The two-pass SHA-1 signature over the response fields.
    #[serde(rename = "SHA1HASH", default)]
    pub hash: String,

    /// The transaction outcome; "00" on success.
    #[serde(rename = "RESULT", default)]
    pub result: String,

    /// A text message describing the result code.
    #[serde(rename = "MESSAGE", default)]
    pub message: String,

    /// Result of the card verification check, when enabled.
    #[serde(rename = "CVNRESULT", default)]
    pub cvn_result: String,

    /// The unique reference the gateway assigned to the transaction.
    #[serde(rename = "PASREF", default)]
    pub pas_ref: String,

    /// The settlement batch for this transaction ("-1" until settled).
    #[serde(rename = "BATCHID", default)]
    pub batch_id: String,

    /// Ecommerce indicator (3-D Secure transactions only).
    #[serde(rename = "ECI", default)]
    pub eci: String,

    /// Cardholder authentication verification value (3-D Secure only).
    #[serde(rename = "CAVV", default)]
    pub cavv: String,

    /// Exchange identifier (3-D Secure only).
    #[serde(rename = "XID", default)]
    pub xid: String,

    /// Comment echoed back from the request.
    #[serde(rename = "COMMENT1", default)]
    pub comment_one: String,

    /// Comment echoed back from the request.
    #[serde(rename = "COMMENT2", default)]
    pub comment_two: String,

    /// Named transaction-suitability-score results, e.g. `TSS_1032`.
    #[serde(rename = "TSS", default)]
    pub tss: BTreeMap<String, String>,

    /// Unrecognized fields, returned to the caller verbatim.
    #[serde(flatten)]
    pub supplementary_data: BTreeMap<String, String>,
}

impl Response {
    /// The timestamp rendered in the gateway layout, or `""` when absent.
    pub fn timestamp_str(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.format(TIME_LAYOUT).to_string(),
            None => String::new(),
        }
    }
}

/// A two-valued flag carried on the wire as the literal strings `"1"`/`"0"`.
///
/// Decoding fails on any other input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flag {
    #[default]
    Off,
    On,
}

impl Flag {
    pub fn is_on(self) -> bool {
        matches!(self, Flag::On)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::On
        } else {
            Flag::Off
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.is_on() { "1" } else { "0" })
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "1" => Ok(Flag::On),
            "0" => Ok(Flag::Off),
            other => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(other),
                &"\"1\" or \"0\"",
            )),
        }
    }
}

/// Amounts travel as plain decimal digit strings.
mod amount_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(0);
        }
        s.parse().map_err(|_| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&s),
                &"a non-negative decimal amount",
            )
        })
    }
}

/// Timestamps travel as `YYYYMMDDHHMMSS`; absent renders as `""`.
mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_LAYOUT;

    pub fn serialize<S: Serializer>(
        timestamp: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timestamp {
            Some(ts) => serializer.serialize_str(&ts.format(TIME_LAYOUT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&s, TIME_LAYOUT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|_| {
                serde::de::Error::invalid_value(
                    serde::de::Unexpected::Str(&s),
                    &"a YYYYMMDDHHMMSS timestamp",
                )
            })
    }
}
