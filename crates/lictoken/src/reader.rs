//! The verifying side: a set of trusted keys.

use std::path::Path;

use lictoken_core::{Ed25519PublicKey, Token};
use tracing::warn;

use crate::decode::{decode, decode_file};
use crate::error::{LicenseError, Result};

/// Configuration for a [`Reader`].
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Accept licenses without checking their signature when no trusted
    /// keys are configured. Off by default.
    pub allow_unverified: bool,
}

/// Reads licenses signed by any of a set of trusted keys.
///
/// Multiple keys support key rotation: licenses issued under the old key
/// keep working while new ones are signed with the new key.
#[derive(Debug, Clone)]
pub struct Reader {
    trusted_keys: Vec<Ed25519PublicKey>,
    config: ReaderConfig,
}

impl Reader {
    /// Create a reader trusting `keys`.
    pub fn new(keys: impl IntoIterator<Item = Ed25519PublicKey>) -> Self {
        Self::with_config(keys, ReaderConfig::default())
    }

    /// Create a reader with explicit configuration.
    pub fn with_config(
        keys: impl IntoIterator<Item = Ed25519PublicKey>,
        config: ReaderConfig,
    ) -> Self {
        Self {
            trusted_keys: keys.into_iter().collect(),
            config,
        }
    }

    /// The trusted keys, in the order they are tried.
    pub fn trusted_keys(&self) -> &[Ed25519PublicKey] {
        &self.trusted_keys
    }

    /// The reader's configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode and verify a license.
    pub fn read(&self, text: impl AsRef<[u8]>) -> Result<Token> {
        self.check_keys()?;
        decode(text, &self.trusted_keys)
    }

    /// Read and verify a license file.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Token> {
        self.check_keys()?;
        decode_file(path, &self.trusted_keys)
    }

    fn check_keys(&self) -> Result<()> {
        if self.trusted_keys.is_empty() && !self.config.allow_unverified {
            warn!("reader has no trusted keys, refusing to read");
            return Err(LicenseError::SignatureInvalid);
        }
        Ok(())
    }
}
