//! # HPP Wire
//!
//! Canonical hash construction, two-pass SHA-1 signing and wire encoding
//! for hosted-payment-page messages.
//!
//! This crate provides:
//! - The canonical `.`-joined hash string for requests and responses
//! - `compute_signature`: SHA-1(canonical), then SHA-1(digest `.` secret)
//! - A Base64 transport codec for encoded wire mode
//! - [`Hpp`]: build outbound requests, parse and verify inbound responses
//!
//! ## Signing scheme
//!
//! Form the canonical string from the signed fields, joined with `.`
//! (empty fields render as empty segments):
//!
//! ```text
//! 20130814122239.thestore.ORD453-11.29900.EUR
//! ```
//!
//! SHA-1 it, join the 40-hex-char digest with the shared secret using `.`,
//! and SHA-1 again. The result is the `SHA1HASH` wire value. The secret is
//! supplied out-of-band and never transmitted.
//!
//! ## Example
//!
//! ```rust
//! use hpp_core::Request;
//! use hpp_wire::Hpp;
//!
//! let hpp = Hpp::new("mysecret");
//! let request = Request {
//!     merchant_id: "thestore".to_string(),
//!     amount: 29900,
//!     currency: "EUR".to_string(),
//!     ..Request::default()
//! };
//!
//! let wire_bytes = hpp.request_to_json(request).expect("request is valid");
//! assert!(!wire_bytes.is_empty());
//! ```

mod canonical;
mod codec;
mod error;
mod hash;
mod hpp;

pub use canonical::*;
pub use codec::*;
pub use error::*;
pub use hash::*;
pub use hpp::*;
