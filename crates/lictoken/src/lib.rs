//! # lictoken
//!
//! Tamper-evident software license tokens.
//!
//! ## Overview
//!
//! A license is a [`Token`] that has been serialized, hashed, signed with
//! the issuer's Ed25519 key, sealed with ChaCha20-Poly1305, compressed and
//! wrapped in a text block:
//!
//! ```text
//! -----BEGIN LICENSE KEY-----
//! id: lic-2024-0001
//!
//! 7Zbbbq...
//! -----END LICENSE KEY-----
//! ```
//!
//! Reading reverses each stage and fails at the first one that does not
//! check out. Any change to the text, the token or the signature is caught.
//!
//! ## Usage
//!
//! ```rust
//! use lictoken::{Issuer, Keypair, Reader, Token};
//!
//! let issuer = Issuer::new(Keypair::generate());
//! let token = Token::builder("lic-2024-0001")
//!     .customer("acme")
//!     .issued_at(1_700_000_000)
//!     .expires_at(1_800_000_000)
//!     .build();
//!
//! let text = issuer.issue(&token).unwrap();
//!
//! let reader = Reader::new([issuer.public_key()]);
//! let decoded = reader.read(&text).unwrap();
//! assert_eq!(decoded, token);
//! assert!(!decoded.has_expired(1_750_000_000));
//! ```
//!
//! ## Revocation
//!
//! Local verification proves who issued a license, not that it is still
//! wanted. [`RevocationClient`] asks issuer-controlled DNS or HTTP oracles
//! whether the token's [fingerprint](Token::fingerprint) is still published.
//!
//! ## Re-exports
//!
//! - `lictoken::core` - Token model, canonical encoding, keys
//! - `lictoken::oracle` - Revocation oracles

pub mod armor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod issuer;
pub mod reader;

// Re-export component crates
pub use lictoken_core as core;
pub use lictoken_oracle as oracle;

// Re-export main types for convenience
pub use armor::{ArmoredBlock, HEADER_ID, LICENSE_LABEL};
pub use decode::{decode, decode_file};
pub use encode::encode;
pub use error::{ErrorKind, LicenseError, Result};
pub use issuer::Issuer;
pub use reader::{Reader, ReaderConfig};

// Re-export commonly used component types
pub use lictoken_core::{Ed25519PublicKey, Keypair, Token, TokenBuilder};
pub use lictoken_oracle::{OracleConfig, RevocationClient, Verdict};
