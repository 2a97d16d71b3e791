//! # HPP Core
//!
//! Record types and field validation for hosted-payment-page (HPP)
//! requests and responses.
//!
//! This crate provides:
//! - `Request` and `Response` types with the fixed upper-case wire mapping
//! - The per-field rule table (requiredness, length bounds, patterns)
//! - A validation engine that aggregates every violation in one error
//!
//! Signature construction and the wire codec live in `hpp-wire`.
//!
//! ## Example
//!
//! ```rust
//! use hpp_core::{validate_request, Request};
//!
//! let request = Request {
//!     merchant_id: "thestore".to_string(),
//!     order_id: "ORD453-11".to_string(),
//!     amount: 29900,
//!     currency: "EUR".to_string(),
//!     ..Request::default()
//! };
//!
//! validate_request(&request).expect("request satisfies the rule table");
//! ```

pub mod fields;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use types::*;
pub use validation::*;
