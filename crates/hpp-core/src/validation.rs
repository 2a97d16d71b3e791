//! Field validation for HPP requests and responses
//!
//! Validation is a pure function over a record: every field is checked
//! against its descriptor in [`crate::fields`], no rule short-circuits the
//! others, and all violations come back in one [`ValidationErrors`]
//! aggregate keyed by wire field name.

use std::collections::BTreeMap;
use std::fmt;

use crate::fields::{self, FieldRules};
use crate::types::{Request, Response};

/// All field-rule violations found in one record.
///
/// Each field carries at most one message: the first rule it violated, in
/// required/length/pattern order. Entries are ordered lexicographically by
/// wire field name so the rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: BTreeMap<&'static str, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// The message recorded for a wire field, if any.
    pub fn message(&self, wire_name: &str) -> Option<&'static str> {
        self.violations.get(wire_name).copied()
    }

    /// Violations in wire-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.violations.iter().map(|(field, message)| (*field, *message))
    }

    fn add(&mut self, wire_name: &'static str, message: &'static str) {
        self.violations.entry(wire_name).or_insert(message);
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .violations
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{rendered}.")
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate an outbound request against the full rule table.
///
/// # Errors
///
/// Returns `ValidationErrors` carrying every violated field.
pub fn validate_request(request: &Request) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let checks: [(&FieldRules, &str); 20] = [
        (&fields::MERCHANT_ID, &request.merchant_id),
        (&fields::ACCOUNT, &request.account),
        (&fields::ORDER_ID, &request.order_id),
        (&fields::CURRENCY, &request.currency),
        (&fields::HASH, &request.hash),
        (&fields::AUTO_SETTLE_FLAG, &request.auto_settle_flag),
        (&fields::COMMENT_ONE, &request.comment_one),
        (&fields::COMMENT_TWO, &request.comment_two),
        (&fields::SHIPPING_CODE, &request.shipping_code),
        (&fields::SHIPPING_COUNTRY, &request.shipping_country),
        (&fields::BILLING_CODE, &request.billing_code),
        (&fields::BILLING_COUNTRY, &request.billing_country),
        (&fields::CUSTOMER_NUMBER, &request.customer_number),
        (&fields::VARIABLE_REFERENCE, &request.variable_reference),
        (&fields::PRODUCT_ID, &request.product_id),
        (&fields::LANGUAGE, &request.language),
        (&fields::CARD_PAYMENT_BUTTON, &request.card_payment_button),
        (&fields::PAYER_REFERENCE, &request.payer_reference),
        (&fields::PAYMENT_REFERENCE, &request.payment_reference),
        (&fields::PAYER_EXISTS, &request.payer_exists),
    ];

    for (rules, value) in checks {
        if let Some(message) = rules.check(value) {
            errors.add(rules.wire_name, message);
        }
    }

    check_request_amount(request, &mut errors);

    errors.into_result()
}

/// Validate an inbound response record.
///
/// Applies the shape rules shared with requests. The signature check is a
/// separate, mandatory step at parse time; this covers callers that want
/// field-level checks on top of it.
///
/// # Errors
///
/// Returns `ValidationErrors` carrying every violated field.
pub fn validate_response(response: &Response) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let checks: [(&FieldRules, &str); 6] = [
        (&fields::MERCHANT_ID, &response.merchant_id),
        (&fields::ACCOUNT, &response.account),
        (&fields::ORDER_ID, &response.order_id),
        (&fields::HASH, &response.hash),
        (&fields::COMMENT_ONE, &response.comment_one),
        (&fields::COMMENT_TWO, &response.comment_two),
    ];

    for (rules, value) in checks {
        if let Some(message) = rules.check(value) {
            errors.add(rules.wire_name, message);
        }
    }

    if response.amount > fields::AMOUNT_MAX {
        errors.add("AMOUNT", fields::AMOUNT_SIZE);
    }

    errors.into_result()
}

// Amount is typed, so its digits-only rule holds by construction; what is
// left is requiredness, the magnitude bound and the OTB zero rule.
fn check_request_amount(request: &Request, errors: &mut ValidationErrors) {
    if request.validate_card_only.is_on() {
        if request.amount != 0 {
            errors.add("AMOUNT", fields::AMOUNT_OTB);
        }
        return;
    }

    if request.amount == 0 {
        errors.add("AMOUNT", fields::REQUIRED);
    } else if request.amount > fields::AMOUNT_MAX {
        errors.add("AMOUNT", fields::AMOUNT_SIZE);
    }
}
