//! Error types for encoding and decoding licenses.

use lictoken_core::{CoreError, ValidationError};
use lictoken_seal::SealError;
use thiserror::Error;

/// The category of a [`LicenseError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedContainer,
    DecodeFailure,
    DecompressFailure,
    AuthenticationFailure,
    ChecksumMismatch,
    SignatureInvalid,
    IdentifierMismatch,
    MissingIdentifier,
    InvalidValidityWindow,
    MissingPrivateKey,
    EncodeFailure,
    Io,
}

/// Errors that can occur while issuing or reading a license.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The armored block is missing, unterminated or otherwise unreadable.
    #[error("malformed license container: {0}")]
    MalformedContainer(String),

    /// An intermediate structure could not be parsed.
    #[error("license decode failure: {0}")]
    DecodeFailure(String),

    /// The compressed body is corrupt or truncated.
    #[error("license decompression failed: {0}")]
    DecompressFailure(String),

    /// The sealed token did not authenticate.
    #[error("license authentication failed")]
    AuthenticationFailure,

    /// The decrypted token does not match its declared hash.
    #[error("license checksum mismatch")]
    ChecksumMismatch,

    /// No trusted key produced the signature.
    #[error("license signature invalid")]
    SignatureInvalid,

    /// The armor header does not name the token inside it.
    #[error("license identifier mismatch: header {header:?}, token {token:?}")]
    IdentifierMismatch {
        header: Option<String>,
        token: String,
    },

    /// The token has no identifier.
    #[error("license identifier is empty")]
    MissingIdentifier,

    /// The token's expiry is not after its issue time.
    #[error("invalid validity window: issued_at={issued_at:?}, expires_at={expires_at:?}")]
    InvalidValidityWindow {
        issued_at: Option<i64>,
        expires_at: Option<i64>,
    },

    /// Encoding was requested without a signing key.
    #[error("no private key to sign the license with")]
    MissingPrivateKey,

    /// An encoding stage failed.
    #[error("license encode failure: {0}")]
    EncodeFailure(String),

    /// The license file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LicenseError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedContainer(_) => ErrorKind::MalformedContainer,
            Self::DecodeFailure(_) => ErrorKind::DecodeFailure,
            Self::DecompressFailure(_) => ErrorKind::DecompressFailure,
            Self::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            Self::ChecksumMismatch => ErrorKind::ChecksumMismatch,
            Self::SignatureInvalid => ErrorKind::SignatureInvalid,
            Self::IdentifierMismatch { .. } => ErrorKind::IdentifierMismatch,
            Self::MissingIdentifier => ErrorKind::MissingIdentifier,
            Self::InvalidValidityWindow { .. } => ErrorKind::InvalidValidityWindow,
            Self::MissingPrivateKey => ErrorKind::MissingPrivateKey,
            Self::EncodeFailure(_) => ErrorKind::EncodeFailure,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<ValidationError> for LicenseError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingIdentifier => LicenseError::MissingIdentifier,
            ValidationError::InvalidValidityWindow {
                issued_at,
                expires_at,
            } => LicenseError::InvalidValidityWindow {
                issued_at,
                expires_at,
            },
        }
    }
}

impl From<CoreError> for LicenseError {
    fn from(err: CoreError) -> Self {
        LicenseError::DecodeFailure(err.to_string())
    }
}

/// Maps the decode side of the envelope codec. Encode-side failures go
/// through [`LicenseError::EncodeFailure`] explicitly.
impl From<SealError> for LicenseError {
    fn from(err: SealError) -> Self {
        match err {
            SealError::AuthFailed => LicenseError::AuthenticationFailure,
            SealError::Decompress(msg) => LicenseError::DecompressFailure(msg),
            SealError::InvalidKeyLength { .. }
            | SealError::InvalidNonceLength { .. }
            | SealError::Serialization(_)
            | SealError::Base64 { .. } => LicenseError::DecodeFailure(err.to_string()),
            SealError::EncryptionError | SealError::Compress(_) => {
                LicenseError::EncodeFailure(err.to_string())
            }
        }
    }
}

/// Result type for license operations.
pub type Result<T> = std::result::Result<T, LicenseError>;
