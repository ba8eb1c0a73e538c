//! # lictoken core
//!
//! Pure primitives for license tokens: the token model, its canonical
//! encoding, content hashing, and Ed25519 signing.
//!
//! This crate contains no I/O, no compression, no encryption. It is pure
//! computation over the token and its signatures.
//!
//! ## Key Types
//!
//! - [`Token`] - The license record: identifier, validity window, opaque payload
//! - [`TokenBuilder`] - Assembles a [`Token`]
//! - [`Keypair`] / [`Ed25519PublicKey`] - Issuer signing and trusted verification keys
//! - [`Sha256Hash`] - Content hash of the canonical encoding
//!
//! ## Canonicalization
//!
//! Tokens are encoded as deterministic CBOR. See the [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod token;
pub mod validation;

pub use canonical::{canonical_bytes, decode_canonical, SCHEMA_VERSION};
pub use crypto::{verify_any, Ed25519PublicKey, Ed25519Signature, Keypair, Sha256Hash};
pub use error::{CoreError, ValidationError};
pub use token::{now_secs, Token, TokenBuilder};
pub use validation::validate_token;
