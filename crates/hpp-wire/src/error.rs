//! Error types for HPP Wire

use hpp_core::ValidationErrors;
use thiserror::Error;

/// Errors raised while encoding, decoding or signature-checking a payload.
#[derive(Debug, Error)]
pub enum WireError {
    /// The received signature does not match the recomputed expectation.
    /// The response must be discarded, never partially used.
    #[error("secret does not match expected: expected hash {expected} received {received}")]
    SignatureMismatch { expected: String, received: String },

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid base64 in field {field}: {source}")]
    Base64 {
        field: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("field {field} does not decode to UTF-8 text")]
    Utf8 { field: String },

    #[error("field {field} cannot be encoded: {reason}")]
    Encoding { field: String, reason: String },
}

/// Top-level error for building or parsing an HPP message.
#[derive(Debug, Error)]
pub enum HppError {
    #[error("failed to validate HPP request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Wire(#[from] WireError),
}
