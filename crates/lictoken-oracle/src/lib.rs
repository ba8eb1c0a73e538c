//! # lictoken oracle
//!
//! Out-of-band validity checks for decoded license tokens.
//!
//! ## Overview
//!
//! Local decoding proves a token was issued by a trusted key. It cannot
//! prove the issuer still stands behind it. An oracle is a channel the
//! issuer controls where it publishes the fingerprints of live licenses:
//!
//! - **DNS**: a TXT record at `<id>.<host>` ([`DnsOracle`])
//! - **HTTP**: a line in the body of `GET <endpoint>/<id>` ([`HttpOracle`])
//!
//! Revoking a license means removing its fingerprint.
//!
//! ## Usage
//!
//! ```rust
//! use lictoken_core::Token;
//! use lictoken_oracle::{DnsOracle, MemoryResolver, RevocationClient};
//!
//! # async fn example() {
//! let token = Token::builder("lic-1").build();
//! let resolver = MemoryResolver::new()
//!     .with_records("lic-1.licenses.example.com", [token.fingerprint()]);
//!
//! let client = RevocationClient::new()
//!     .with_oracle(DnsOracle::new(resolver, ["licenses.example.com"]));
//! assert!(client.verify(&token).await);
//! # }
//! ```
//!
//! ## Features
//!
//! - `dns` (default): [`HickoryResolver`] over the system resolver
//! - `http`: [`ReqwestFetcher`] over rustls

pub mod client;
pub mod config;
pub mod dns;
pub mod error;
pub mod http;
pub mod memory;
pub mod oracle;

pub use client::RevocationClient;
pub use config::OracleConfig;
#[cfg(feature = "dns")]
pub use dns::HickoryResolver;
pub use dns::{DnsOracle, TxtResolver};
pub use error::{OracleError, Result};
#[cfg(feature = "http")]
pub use http::ReqwestFetcher;
pub use http::{HttpFetcher, HttpOracle};
pub use memory::{MemoryFetcher, MemoryResolver};
pub use oracle::{Oracle, Verdict};
