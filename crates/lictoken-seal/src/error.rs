//! Error types for the envelope codec.

use thiserror::Error;

use crate::envelope::EnvelopeField;

/// Errors that can occur while sealing, compressing or parsing envelopes.
#[derive(Debug, Error)]
pub enum SealError {
    /// Key material shorter than the cipher key.
    #[error("invalid key length: need at least {required} bytes, got {actual}")]
    InvalidKeyLength { required: usize, actual: usize },

    /// Nonce material shorter than the cipher nonce.
    #[error("invalid nonce length: need at least {required} bytes, got {actual}")]
    InvalidNonceLength { required: usize, actual: usize },

    /// Authentication tag did not verify. Deliberately carries no detail.
    #[error("authentication failed")]
    AuthFailed,

    /// Encryption error.
    #[error("encryption error")]
    EncryptionError,

    /// Compression error.
    #[error("compression error: {0}")]
    Compress(String),

    /// Corrupt, truncated or oversized deflate stream.
    #[error("decompression error: {0}")]
    Decompress(String),

    /// Envelope structure could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An envelope field is not valid unpadded base64url.
    #[error("invalid base64 in envelope field {field}: {message}")]
    Base64 {
        field: EnvelopeField,
        message: String,
    },
}

/// Result type for envelope codec operations.
pub type Result<T> = std::result::Result<T, SealError>;
