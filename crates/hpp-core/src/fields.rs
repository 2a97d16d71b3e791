//! Field descriptor table
//!
//! Each validated field maps to a [`FieldRules`] descriptor: wire name,
//! requiredness, length bounds and a full-match character-class pattern,
//! together with the canonical message for each rule. The table is consumed
//! by the validation engine; requiredness is carried per field, never as
//! ambient state.
//!
//! Lengths are counted in Unicode code points, not bytes. Non-required
//! rules skip empty values, so patterns admitting the empty string are
//! effectively "when present" constraints.

use std::sync::LazyLock;

use regex::Regex;

/// Validation rules for one named wire field.
pub struct FieldRules {
    pub wire_name: &'static str,
    pub required: bool,
    /// Inclusive length bounds, in code points.
    pub length: Option<(usize, usize)>,
    pub pattern: Option<&'static LazyLock<Regex>>,
    /// Message when the length bound is violated (or the field is missing).
    pub size_message: &'static str,
    /// Message when the pattern is violated.
    pub pattern_message: &'static str,
}

impl FieldRules {
    /// Apply this descriptor to a value, returning the first violated
    /// rule's canonical message. Rule order: required, length, pattern.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        if value.is_empty() {
            if self.required {
                return Some(REQUIRED);
            }
            return None;
        }

        if let Some((min, max)) = self.length {
            let count = value.chars().count();
            if count < min || count > max {
                return Some(self.size_message);
            }
        }

        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Some(self.pattern_message);
            }
        }

        None
    }
}

/// Canonical message for a missing required field.
pub const REQUIRED: &str = "is required";

pub const AMOUNT_SIZE: &str = "Amount is required and must be 11 characters or less";
pub const AMOUNT_OTB: &str =
    "Amount must be 0 for OTB transactions (where validate card only set to 1)";

/// Highest amount the gateway accepts, in the minor currency unit.
pub const AMOUNT_MAX: u64 = 999_999_999;

static MERCHANT_ID_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[a-zA-Z0-9.]*$"));
static ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[a-zA-Z0-9\s]*$"));
static ORDER_ID_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[a-zA-Z0-9_-]*$"));
static ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[a-zA-Z]*$"));
static HEXADECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[0-9a-fA-F]+$"));
static AUTO_SETTLE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)^(on|off|multi|0|1)?$"));
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^[\s\x{0020}-\x{003B}\x{003D}\x{003F}-\x{007E}\x{00A1}-\x{00FF}\x{20AC}\x{201A}\x{0192}\x{201E}\x{2026}\x{2020}\x{2021}\x{02C6}\x{2030}\x{0160}\x{2039}\x{0152}\x{017D}\x{2018}\x{2019}\x{201C}\x{201D}\x{2022}\x{2013}\x{2014}\x{02DC}\x{2122}\x{0161}\x{203A}\x{0153}\x{017E}\x{0178}]*$")
});
static PAYER_EXISTS_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[012]*$"));
static SHIPPING_CODE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9,.\-/\\| ]*$"));
static COUNTRY_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9,.\- ]*$"));
static BILLING_CODE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9,.\-/|* ]*$"));
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[a-zA-Z0-9._\-,+@\s]*$"));
static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^([a-zA-Z]{2})?$"));
static PAYER_REF_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9_\-\\ ]*$"));
static PAYMENT_REF_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9_-]*$"));
static CARD_PAYMENT_BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"^[a-zA-Z0-9\x{00C0}-\x{00FF}\x{00A4}\x{00A5}\x{0152}\x{017D}\x{0161}\x{0153}\x{017E}\x{0178}',+"._\-&/@!?%()*:\x{00A3}$\x{20AC}#\[\]|=\\\x{201C}\x{201D} ]*$"#)
});

// The patterns above are fixed literals; compilation failure is a
// programming error caught by the pattern tests below.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("field pattern compiles")
}

pub static MERCHANT_ID: FieldRules = FieldRules {
    wire_name: "MERCHANT_ID",
    required: true,
    length: Some((1, 50)),
    pattern: Some(&MERCHANT_ID_RE),
    size_message: "Merchant ID is required and must be between 1 and 50 characters",
    pattern_message: "Merchant ID must only contain alphanumeric characters",
};

pub static ACCOUNT: FieldRules = FieldRules {
    wire_name: "ACCOUNT",
    required: false,
    length: Some((0, 30)),
    pattern: Some(&ACCOUNT_RE),
    size_message: "Account must be 30 characters or less",
    pattern_message: "Account must only contain alphanumeric characters",
};

pub static ORDER_ID: FieldRules = FieldRules {
    wire_name: "ORDER_ID",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&ORDER_ID_RE),
    size_message: "Order ID must be less than 50 characters in length",
    pattern_message: "Order ID must only contain alphanumeric characters, dash and underscore",
};

pub static CURRENCY: FieldRules = FieldRules {
    wire_name: "CURRENCY",
    required: false,
    length: Some((3, 3)),
    pattern: Some(&ALPHA_RE),
    size_message: "Currency is required and must be 3 characters in length",
    pattern_message: "Currency must only consist of alphabetic characters",
};

pub static HASH: FieldRules = FieldRules {
    wire_name: "SHA1HASH",
    required: false,
    length: Some((40, 40)),
    pattern: Some(&HEXADECIMAL_RE),
    size_message: "Security hash must be 40 characters in length",
    pattern_message: "Security hash must only contain numeric and a-f characters",
};

pub static AUTO_SETTLE_FLAG: FieldRules = FieldRules {
    wire_name: "AUTO_SETTLE_FLAG",
    required: false,
    length: None,
    pattern: Some(&AUTO_SETTLE_RE),
    size_message: "Auto settle flag must be 0, 1, on, off or multi",
    pattern_message: "Auto settle flag must be 0, 1, on, off or multi",
};

pub static COMMENT_ONE: FieldRules = FieldRules {
    wire_name: "COMMENT1",
    required: false,
    length: Some((0, 255)),
    pattern: Some(&COMMENT_RE),
    size_message: "Comment must be less than 255 characters in length",
    pattern_message: "Comment must only contain the characters a-z A-Z 0-9 ' \", + \u{201C}\u{201D} ._ - & \\ / @ ! ? % ( ) * : £ $ & € # [ ] | = ; ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷ø¤ùúûüýþÿ\u{0152}\u{017D}\u{0161}\u{0153}\u{017E}\u{0178}¥",
};

pub static COMMENT_TWO: FieldRules = FieldRules {
    wire_name: "COMMENT2",
    required: false,
    length: Some((0, 255)),
    pattern: Some(&COMMENT_RE),
    size_message: "Comment must be less than 255 characters in length",
    pattern_message: "Comment must only contain the characters a-z A-Z 0-9 ' \", + \u{201C}\u{201D} ._ - & \\ / @ ! ? % ( ) * : £ $ & € # [ ] | = ; ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷ø¤ùúûüýþÿ\u{0152}\u{017D}\u{0161}\u{0153}\u{017E}\u{0178}¥",
};

pub static SHIPPING_CODE: FieldRules = FieldRules {
    wire_name: "SHIPPING_CODE",
    required: false,
    length: Some((0, 30)),
    pattern: Some(&SHIPPING_CODE_RE),
    size_message: "Shipping code must not be more than 30 characters in length",
    pattern_message: "Shipping code must be of format <digits from postcode>|<digits from address> and contain only a-z A-Z 0-9 , . - / | spaces",
};

pub static SHIPPING_COUNTRY: FieldRules = FieldRules {
    wire_name: "SHIPPING_CO",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&COUNTRY_RE),
    size_message: "Shipping country must not contain more than 50 characters",
    pattern_message: "Shipping country must only contain the characters A-Z a-z 0-9 , . -",
};

pub static BILLING_CODE: FieldRules = FieldRules {
    wire_name: "BILLING_CODE",
    required: false,
    length: Some((0, 60)),
    pattern: Some(&BILLING_CODE_RE),
    size_message: "Billing code must not be more than 60 characters in length",
    pattern_message: "Billing code must be of format <digits from postcode>|<digits from address> and contain only a-z A-Z 0-9 , . - / | spaces",
};

pub static BILLING_COUNTRY: FieldRules = FieldRules {
    wire_name: "BILLING_CO",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&COUNTRY_RE),
    size_message: "Billing country must not contain more than 50 characters",
    pattern_message: "Billing country must only contain the characters A-Z a-z 0-9 , . -",
};

pub static CUSTOMER_NUMBER: FieldRules = FieldRules {
    wire_name: "CUST_NUM",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&REFERENCE_RE),
    size_message: "Customer number must not contain more than 50 characters",
    pattern_message: "Customer number must only contain the characters a-z A-Z 0-9 - _ . , + @ spaces",
};

pub static VARIABLE_REFERENCE: FieldRules = FieldRules {
    wire_name: "VAR_REF",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&REFERENCE_RE),
    size_message: "Variable reference must not contain more than 50 characters",
    pattern_message: "Variable reference must only contain the characters a-z A-Z 0-9 - _ . , + @ spaces",
};

pub static PRODUCT_ID: FieldRules = FieldRules {
    wire_name: "PROD_ID",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&REFERENCE_RE),
    size_message: "Product ID must not contain more than 50 characters",
    pattern_message: "Product ID must only contain the characters a-z A-Z 0-9 - _ . , + @ spaces",
};

pub static LANGUAGE: FieldRules = FieldRules {
    wire_name: "HPP_LANG",
    required: false,
    length: None,
    pattern: Some(&LANGUAGE_RE),
    size_message: "Language must be 2 alphabetic characters only",
    pattern_message: "Language must be 2 alphabetic characters only",
};

pub static CARD_PAYMENT_BUTTON: FieldRules = FieldRules {
    wire_name: "CARD_PAYMENT_BUTTON",
    required: false,
    length: Some((0, 25)),
    pattern: Some(&CARD_PAYMENT_BUTTON_RE),
    size_message: "Card payment button text must not contain more than 25 characters",
    pattern_message: "Card payment button text must only contain the characters a-z A-Z 0-9 ' , + \u{201C}\u{201D} ._ - & \\ / @!? % ( ) * :£ $ & € # [] | =",
};

pub static PAYER_REFERENCE: FieldRules = FieldRules {
    wire_name: "PAYER_REF",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&PAYER_REF_RE),
    size_message: "Payer reference must not be more than 50 characters in length",
    pattern_message: "Payer reference must only contain the characters a-z A-Z\\ 0-9 _ spaces",
};

pub static PAYMENT_REFERENCE: FieldRules = FieldRules {
    wire_name: "PMT_REF",
    required: false,
    length: Some((0, 50)),
    pattern: Some(&PAYMENT_REF_RE),
    size_message: "Payment reference must not be more than 50 characters in length",
    pattern_message: "Payment reference must only contain  characters a-z A-Z 0-9 _ - spaces",
};

pub static PAYER_EXISTS: FieldRules = FieldRules {
    wire_name: "PAYER_EXIST",
    required: false,
    length: Some((1, 1)),
    pattern: Some(&PAYER_EXISTS_RE),
    size_message: "Payer exists flag must not be more than 1 character in length",
    pattern_message: "Payer exists flag must be 0, 1 or 2",
};

/// Every named wire key carried by requests or responses. Keys absent from
/// this set are supplementary data.
pub const NAMED_WIRE_FIELDS: &[&str] = &[
    "MERCHANT_ID",
    "ACCOUNT",
    "ORDER_ID",
    "AMOUNT",
    "CURRENCY",
    "TIMESTAMP",
    "SHA1HASH",
    "AUTO_SETTLE_FLAG",
    "COMMENT1",
    "COMMENT2",
    "RETURN_TSS",
    "SHIPPING_CODE",
    "SHIPPING_CO",
    "BILLING_CODE",
    "BILLING_CO",
    "CUST_NUM",
    "VAR_REF",
    "PROD_ID",
    "HPP_LANG",
    "CARD_PAYMENT_BUTTON",
    "CARD_STORAGE_ENABLE",
    "OFFER_SAVE_CARD",
    "PAYER_REF",
    "PMT_REF",
    "PAYER_EXIST",
    "VALIDATE_CARD_ONLY",
    "DCC_ENABLE",
    "HPP_FRAUDFILTER_MODE",
    "HPP_VERSION",
    "HPP_SELECT_STORED_CARD",
    "AUTHCODE",
    "RESULT",
    "MESSAGE",
    "CVNRESULT",
    "PASREF",
    "BATCHID",
    "ECI",
    "CAVV",
    "XID",
    "TSS",
];

/// Whether a wire key belongs to a named field (as opposed to the
/// supplementary-data bag).
pub fn is_named_field(key: &str) -> bool {
    NAMED_WIRE_FIELDS.contains(&key)
}
