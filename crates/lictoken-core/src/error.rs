//! Error types for lictoken core.

use thiserror::Error;

/// Errors from canonical decoding and payload handling.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported token schema version: {0}")]
    UnsupportedVersion(u64),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Token invariant violations, checked before a token is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("token identifier is empty")]
    MissingIdentifier,

    #[error("invalid validity window: issued_at={issued_at:?}, expires_at={expires_at:?}")]
    InvalidValidityWindow {
        issued_at: Option<i64>,
        expires_at: Option<i64>,
    },
}
