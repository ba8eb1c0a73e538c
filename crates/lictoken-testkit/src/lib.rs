//! # lictoken testkit
//!
//! Testing utilities for lictoken.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed tokens with their canonical bytes, hashes,
//!   signatures and a license text produced by an independent encoder
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic issuer keys and sample tokens
//!
//! ## Golden Vectors
//!
//! ```rust
//! use lictoken_testkit::vectors::{all_vectors, token_from_vector};
//!
//! for vector in all_vectors() {
//!     let token = token_from_vector(&vector);
//!     assert_eq!(token.fingerprint(), vector.fingerprint);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lictoken_testkit::generators::{TokenParams, token_from_params};
//!
//! proptest! {
//!     #[test]
//!     fn fingerprint_is_deterministic(params: TokenParams) {
//!         let token = token_from_params(&params);
//!         prop_assert_eq!(token.fingerprint(), token.clone().fingerprint());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use lictoken_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([7; 32]);
//! let token = fixture.valid_token("lic-1");
//! assert!(!token.has_expired(fixture.now()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{rotation_fixtures, TestFixture};
