//! Token validation: invariants that must hold before a token is encoded.

use crate::error::ValidationError;
use crate::token::Token;

/// Validate a token's invariants.
///
/// This performs:
/// - Identifier presence
/// - Validity window: timestamps are non-negative, and a set expiry is
///   strictly after the issue time (an absent issue time counts as 0)
pub fn validate_token(token: &Token) -> Result<(), ValidationError> {
    // 1. Identifier
    if token.id.is_empty() {
        return Err(ValidationError::MissingIdentifier);
    }

    // 2. Validity window
    let window_error = || ValidationError::InvalidValidityWindow {
        issued_at: token.issued_at,
        expires_at: token.expires_at,
    };

    let issued_at = token.issued_at.unwrap_or(0);
    if issued_at < 0 {
        return Err(window_error());
    }

    if let Some(expires_at) = token.expires_at {
        if expires_at < 0 || expires_at <= issued_at {
            return Err(window_error());
        }
    }

    Ok(())
}
