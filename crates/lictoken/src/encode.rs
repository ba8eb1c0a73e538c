//! Encode pipeline: token to armored license text.

use std::collections::BTreeMap;

use lictoken_core::{validate_token, Keypair, Sha256Hash, Token};
use lictoken_seal::{compress, seal, Envelope};
use tracing::debug;

use crate::armor::{self, HEADER_ID, LICENSE_LABEL};
use crate::error::{LicenseError, Result};

/// Encode, sign and armor `token`.
///
/// The token is validated before any cryptographic work, so a malformed
/// token is reported as such even when no key is supplied. Nothing is
/// returned unless every stage succeeds.
pub fn encode(token: &Token, keypair: Option<&Keypair>) -> Result<String> {
    validate_token(token)?;
    let keypair = keypair.ok_or(LicenseError::MissingPrivateKey)?;

    let data = token.canonical_bytes();
    let hash = Sha256Hash::hash(&data);
    let signature = keypair.sign(&data);

    // Key and nonce are prefixes of the signature and hash.
    let ciphertext = seal(&data, signature.as_bytes(), hash.as_bytes())
        .map_err(|e| LicenseError::EncodeFailure(e.to_string()))?;

    let envelope = Envelope::new(&ciphertext, signature.as_bytes(), hash.as_bytes());
    let json = envelope
        .to_bytes()
        .map_err(|e| LicenseError::EncodeFailure(e.to_string()))?;
    let packed = compress(&json).map_err(|e| LicenseError::EncodeFailure(e.to_string()))?;

    let headers = BTreeMap::from([(HEADER_ID.to_string(), token.id().to_string())]);
    let text = armor::wrap(LICENSE_LABEL, &headers, &packed)?;

    debug!(
        id = token.id(),
        token_len = data.len(),
        envelope_len = json.len(),
        armored_len = text.len(),
        "license encoded"
    );

    Ok(text)
}
