//! The issuing side: a signing key and the tokens it vouches for.

use std::fmt;

use lictoken_core::{Ed25519PublicKey, Keypair, Token};

use crate::encode::encode;
use crate::error::Result;

/// Issues licenses signed with one key.
#[derive(Clone)]
pub struct Issuer {
    keypair: Keypair,
}

impl Issuer {
    /// Create an issuer with the given signing key.
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// The key readers must trust to accept this issuer's licenses.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Encode `token` as armored license text.
    pub fn issue(&self, token: &Token) -> Result<String> {
        encode(token, Some(&self.keypair))
    }
}

impl fmt::Debug for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issuer")
            .field("public_key", &self.public_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_uses_own_key() {
        let keypair = Keypair::from_seed(&[5u8; 32]);
        let issuer = Issuer::new(keypair.clone());

        let token = Token::builder("lic-1").build();
        assert_eq!(
            issuer.issue(&token).unwrap(),
            encode(&token, Some(&keypair)).unwrap()
        );
        assert_eq!(issuer.public_key(), keypair.public_key());
    }

    #[test]
    fn test_debug_hides_secret() {
        let seed = [5u8; 32];
        let debug = format!("{:?}", Issuer::new(Keypair::from_seed(&seed)));

        assert!(debug.starts_with("Issuer { public_key: Ed25519Pub("));
        assert!(!debug.contains(&hex::encode(&seed[..8])));
    }
}
