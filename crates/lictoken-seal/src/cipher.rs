//! ChaCha20-Poly1305 sealing with key and nonce taken from caller-supplied
//! byte strings.
//!
//! Callers hand over buffers that are at least as long as the cipher needs;
//! only the prefix is used.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};

use crate::error::{Result, SealError};

/// ChaCha20-Poly1305 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// ChaCha20-Poly1305 nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// A 256-bit symmetric key for ChaCha20-Poly1305.
#[derive(Clone)]
pub struct SealKey([u8; KEY_SIZE]);

impl SealKey {
    /// Take the first [`KEY_SIZE`] bytes of `material`.
    pub fn from_prefix(material: &[u8]) -> Result<Self> {
        let prefix = material.get(..KEY_SIZE).ok_or(SealError::InvalidKeyLength {
            required: KEY_SIZE,
            actual: material.len(),
        })?;
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(prefix);
        Ok(Self(bytes))
    }

    /// Encrypt data with this key.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &SealNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0).map_err(|_| {
            SealError::InvalidKeyLength {
                required: KEY_SIZE,
                actual: self.0.len(),
            }
        })?;

        cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|_| SealError::EncryptionError)
    }

    /// Decrypt data with this key.
    ///
    /// Every failure is reported as [`SealError::AuthFailed`]: a caller
    /// cannot tell a wrong key from a wrong nonce or a modified ciphertext.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &SealNonce) -> Result<Vec<u8>> {
        let cipher =
            ChaCha20Poly1305::new_from_slice(&self.0).map_err(|_| SealError::AuthFailed)?;

        cipher
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|_| SealError::AuthFailed)
    }
}

/// A 96-bit nonce for ChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealNonce([u8; NONCE_SIZE]);

impl SealNonce {
    /// Take the first [`NONCE_SIZE`] bytes of `material`.
    pub fn from_prefix(material: &[u8]) -> Result<Self> {
        let prefix = material.get(..NONCE_SIZE).ok_or(SealError::InvalidNonceLength {
            required: NONCE_SIZE,
            actual: material.len(),
        })?;
        let mut bytes = [0u8; NONCE_SIZE];
        bytes.copy_from_slice(prefix);
        Ok(Self(bytes))
    }
}

/// Encrypt `data` with the key and nonce prefixes of `key` and `nonce`.
pub fn seal(data: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let key = SealKey::from_prefix(key)?;
    let nonce = SealNonce::from_prefix(nonce)?;
    key.encrypt(data, &nonce)
}

/// Inverse of [`seal`].
pub fn open(ciphertext: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let key = SealKey::from_prefix(key)?;
    let nonce = SealNonce::from_prefix(nonce)?;
    key.decrypt(ciphertext, &nonce)
}
