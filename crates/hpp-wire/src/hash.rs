//! Two-pass SHA-1 signing for HPP messages
//!
//! Every message carries a signature proving it was not tampered with in
//! transit. The scheme is a hash-of-hash-with-secret: hash the canonical
//! field string, join the hex digest with the shared secret, hash again.
//! The secret itself is never transmitted.

use sha1::{Digest, Sha1};

use hpp_core::{Request, Response, SEPARATOR};

use crate::canonical::{request_hash_string, response_hash_string};

/// Hash raw bytes with SHA-1, rendered as 40 lowercase hex characters.
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Compute the signature for a canonical field string.
///
/// 1. SHA-1 the canonical string, render as 40 lowercase hex chars.
/// 2. Join that digest and the shared secret with `.`.
/// 3. SHA-1 the result; the hex rendering is the signature.
///
/// # Example
///
/// ```rust
/// use hpp_wire::compute_signature;
///
/// let signature = compute_signature("test", "secret");
/// assert_eq!(signature, "c6f07ec4e93a4fbd1a0ef1be168dabf7c2106106");
/// ```
pub fn compute_signature(canonical: &str, secret: &str) -> String {
    let first = sha1_hex(canonical.as_bytes());
    sha1_hex(format!("{first}{SEPARATOR}{secret}").as_bytes())
}

/// The signature for an outbound request.
pub fn request_signature(request: &Request, secret: &str) -> String {
    compute_signature(&request_hash_string(request), secret)
}

/// The signature expected of an inbound response.
pub fn response_signature(response: &Response, secret: &str) -> String {
    compute_signature(&response_hash_string(response), secret)
}

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
