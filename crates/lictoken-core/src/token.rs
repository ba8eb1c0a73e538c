//! Token: the license record.
//!
//! A token carries an identifier, an optional validity window, a few
//! classification strings and an opaque payload. Once built it cannot be
//! edited; a changed license is a new token.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::canonical::canonical_bytes;
use crate::crypto::Sha256Hash;
use crate::error::CoreError;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// A license token.
///
/// Timestamps are Unix seconds. A zero timestamp and an empty classification
/// string are normalized to `None` so every logical token has exactly one
/// canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) id: String,
    pub(crate) customer: Option<String>,
    pub(crate) subscription: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) issued_at: Option<i64>,
    pub(crate) expires_at: Option<i64>,
    pub(crate) payload: Bytes,
}

impl Token {
    /// Start building a token with the given identifier.
    pub fn builder(id: impl Into<String>) -> TokenBuilder {
        TokenBuilder::new(id)
    }

    /// The caller-assigned, globally unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Customer identifier, if any.
    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    /// Subscription identifier, if any.
    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    /// License type, if any.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Issue time (Unix seconds).
    pub fn issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    /// Expiry time (Unix seconds). `None` never expires.
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// The opaque payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Deserialize the payload as JSON into the caller's own schema.
    pub fn payload_json<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        Ok(serde_json::from_slice(&self.payload)?)
    }

    /// Whether the token is past its expiry at `now` (Unix seconds).
    ///
    /// Only an absent expiry never expires. Any set expiry, negative
    /// included, is compared against `now`.
    pub fn has_expired(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// [`has_expired`](Self::has_expired) against the system clock.
    pub fn is_expired(&self) -> bool {
        self.has_expired(now_secs())
    }

    /// Deterministic CBOR encoding of every field.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(self)
    }

    /// SHA-256 of the canonical encoding.
    pub fn content_hash(&self) -> Sha256Hash {
        Sha256Hash::hash(&self.canonical_bytes())
    }

    /// Base64url (unpadded) content hash.
    ///
    /// Needs no secret material, so any holder of the token can reproduce
    /// it. Revocation oracles publish this value.
    pub fn fingerprint(&self) -> String {
        self.content_hash().to_base64url()
    }
}

/// Builder for creating tokens.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    id: String,
    customer: Option<String>,
    subscription: Option<String>,
    kind: Option<String>,
    issued_at: Option<i64>,
    expires_at: Option<i64>,
    payload: Bytes,
}

impl TokenBuilder {
    /// Start building a token.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer: None,
            subscription: None,
            kind: None,
            issued_at: None,
            expires_at: None,
            payload: Bytes::new(),
        }
    }

    /// Set the customer identifier.
    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = non_empty(customer.into());
        self
    }

    /// Set the subscription identifier.
    pub fn subscription(mut self, subscription: impl Into<String>) -> Self {
        self.subscription = non_empty(subscription.into());
        self
    }

    /// Set the license type.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = non_empty(kind.into());
        self
    }

    /// Set the issue time. Zero clears it.
    pub fn issued_at(mut self, secs: i64) -> Self {
        self.issued_at = non_zero(secs);
        self
    }

    /// Issue at the current time.
    pub fn issued_now(self) -> Self {
        self.issued_at(now_secs())
    }

    /// Issue at the start of the current UTC day.
    pub fn issued_today(self) -> Self {
        let now = now_secs();
        self.issued_at(now - now.rem_euclid(SECS_PER_DAY))
    }

    /// Set the expiry time. Zero means never.
    pub fn expires_at(mut self, secs: i64) -> Self {
        self.expires_at = non_zero(secs);
        self
    }

    /// Expire `secs` after the issue time (or after now, if no issue time is set).
    pub fn valid_for(self, secs: i64) -> Self {
        let start = self.issued_at.unwrap_or_else(now_secs);
        self.expires_at(start.saturating_add(secs))
    }

    /// Set the opaque payload.
    pub fn payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Set the payload to the JSON serialization of `data`.
    pub fn payload_json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self, CoreError> {
        self.payload = serde_json::to_vec(data)?.into();
        Ok(self)
    }

    /// Build the token.
    ///
    /// Invariants are checked when the token is encoded, not here, so a
    /// caller can inspect an invalid token before deciding what to do.
    pub fn build(self) -> Token {
        Token {
            id: self.id,
            customer: self.customer,
            subscription: self.subscription,
            kind: self.kind,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
            payload: self.payload,
        }
    }
}

/// Current time in Unix seconds.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub(crate) fn non_zero(secs: i64) -> Option<i64> {
    (secs != 0).then_some(secs)
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
