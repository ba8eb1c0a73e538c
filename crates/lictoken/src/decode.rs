//! Decode pipeline: armored license text back to a verified token.

use std::path::Path;

use lictoken_core::{decode_canonical, verify_any, Ed25519PublicKey, Sha256Hash, Token};
use lictoken_seal::{decompress, open, Envelope};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::armor::{self, HEADER_ID, LICENSE_LABEL};
use crate::error::{LicenseError, Result};

/// Decode and verify an armored license.
///
/// The signature is accepted if any key in `keys` produced it. With an
/// empty key list the signature is **not checked at all**: the token is
/// still authenticated against its own hash, but anyone can mint one.
/// Only the first 32 signature bytes feed the cipher key, so changes to the
/// rest of the signature go unnoticed in this mode.
/// [`Reader`](crate::Reader) refuses this mode unless asked for it.
///
/// Expiry is not checked here; see [`Token::has_expired`].
pub fn decode(text: impl AsRef<[u8]>, keys: &[Ed25519PublicKey]) -> Result<Token> {
    let text = std::str::from_utf8(text.as_ref())
        .map_err(|e| LicenseError::MalformedContainer(format!("not UTF-8 text: {e}")))?;

    let block = armor::unwrap(text, LICENSE_LABEL)?;
    let json = decompress(&block.payload)?;
    let parts = Envelope::from_bytes(&json)?.decode_parts()?;

    let plaintext = open(&parts.ciphertext, &parts.signature, &parts.hash)?;

    let computed = Sha256Hash::hash(&plaintext);
    if !bool::from(computed.as_bytes()[..].ct_eq(&parts.hash)) {
        return Err(LicenseError::ChecksumMismatch);
    }

    // Signature bytes past the cipher key are only covered by verification.
    if keys.is_empty() {
        warn!("no trusted keys supplied, license signature not verified");
    } else if !verify_any(&plaintext, &parts.signature, keys) {
        return Err(LicenseError::SignatureInvalid);
    }

    let token = decode_canonical(&plaintext)?;

    let header_id = block.header(HEADER_ID);
    if header_id != Some(token.id()) {
        return Err(LicenseError::IdentifierMismatch {
            header: header_id.map(str::to_string),
            token: token.id().to_string(),
        });
    }

    debug!(id = token.id(), verified = !keys.is_empty(), "license decoded");
    Ok(token)
}

/// Read a license file and [`decode`] it.
pub fn decode_file(path: impl AsRef<Path>, keys: &[Ed25519PublicKey]) -> Result<Token> {
    let path = path.as_ref();
    let text = std::fs::read(path)?;
    debug!(path = %path.display(), len = text.len(), "license file read");
    decode(text, keys)
}
