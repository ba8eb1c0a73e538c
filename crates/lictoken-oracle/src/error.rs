//! Error types for oracle lookups.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a single oracle lookup.
///
/// These never escape [`RevocationClient`](crate::RevocationClient): a failed
/// lookup only means that channel could not vouch for the token.
#[derive(Debug, Error)]
pub enum OracleError {
    /// DNS resolution failed.
    #[error("dns lookup failed for {name}: {message}")]
    Dns { name: String, message: String },

    /// HTTP request failed or returned a non-success status.
    #[error("http request failed for {url}: {message}")]
    Http { url: String, message: String },

    /// Lookup did not finish in time.
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The channel could not be set up.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
