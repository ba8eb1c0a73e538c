//! # lictoken seal
//!
//! The envelope codec: the byte transforms that sit between a signed token
//! and its armored text form.
//!
//! ## Overview
//!
//! - [`compress`] / [`decompress`]: raw DEFLATE at best compression
//! - [`seal`] / [`open`]: ChaCha20-Poly1305 authenticated encryption
//! - [`Envelope`]: the wire intermediate holding ciphertext, signature and
//!   content hash, each base64url encoded
//!
//! ## Key Model
//!
//! There is no key negotiation. The symmetric key is the first 32 bytes of
//! the issuer's Ed25519 signature and the nonce is the first 12 bytes of the
//! SHA-256 content hash. This is fixed by the wire format: swapping in a KDF
//! would make every previously issued license unreadable. Confidentiality
//! against a holder of the license is therefore not a goal; the encryption
//! keeps the token opaque in transit and binds the ciphertext to the
//! signature and hash.
//!
//! ## Usage
//!
//! ```rust
//! use lictoken_seal::{compress, decompress, open, seal};
//!
//! let key = [7u8; 64];
//! let nonce = [9u8; 32];
//! let sealed = seal(b"token bytes", &key, &nonce).unwrap();
//! assert_eq!(open(&sealed, &key, &nonce).unwrap(), b"token bytes");
//!
//! let packed = compress(&sealed).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), sealed);
//! ```

pub mod cipher;
pub mod compress;
pub mod envelope;
pub mod error;

pub use cipher::{open, seal, SealKey, SealNonce, KEY_SIZE, NONCE_SIZE};
pub use compress::{compress, decompress, MAX_DECOMPRESSED_LEN};
pub use envelope::{Envelope, EnvelopeField, EnvelopeParts};
pub use error::{Result, SealError};
