//! Canonical CBOR encoding for deterministic serialization.
//!
//! Tokens are encoded as a CBOR map with small integer keys, following
//! RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 seconds)
//!
//! Signatures and fingerprints are computed over these bytes, so the same
//! token must produce identical bytes on every platform. Absent fields are
//! omitted rather than encoded as null.

use ciborium::value::Value;

use crate::error::CoreError;
use crate::token::{non_empty, non_zero, Token};

/// Token schema version written under key 0.
pub const SCHEMA_VERSION: u64 = 1;

/// Token field keys. Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const VERSION: u64 = 0;
    pub const ID: u64 = 1;
    pub const CUSTOMER: u64 = 2;
    pub const SUBSCRIPTION: u64 = 3;
    pub const KIND: u64 = 4;
    pub const ISSUED_AT: u64 = 5;
    pub const EXPIRES_AT: u64 = 6;
    pub const PAYLOAD: u64 = 7;
}

/// A value that may appear in the token map.
enum Field<'a> {
    Uint(u64),
    Int(i64),
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Encode a token to canonical CBOR bytes.
pub fn canonical_bytes(token: &Token) -> Vec<u8> {
    let mut entries = Vec::with_capacity(8);

    entries.push((keys::VERSION, Field::Uint(SCHEMA_VERSION)));
    entries.push((keys::ID, Field::Text(&token.id)));

    if let Some(customer) = &token.customer {
        entries.push((keys::CUSTOMER, Field::Text(customer)));
    }
    if let Some(subscription) = &token.subscription {
        entries.push((keys::SUBSCRIPTION, Field::Text(subscription)));
    }
    if let Some(kind) = &token.kind {
        entries.push((keys::KIND, Field::Text(kind)));
    }
    if let Some(issued_at) = token.issued_at {
        entries.push((keys::ISSUED_AT, Field::Int(issued_at)));
    }
    if let Some(expires_at) = token.expires_at {
        entries.push((keys::EXPIRES_AT, Field::Int(expires_at)));
    }
    if !token.payload.is_empty() {
        entries.push((keys::PAYLOAD, Field::Bytes(&token.payload)));
    }

    let mut buf = Vec::new();
    encode_map_canonical(&mut buf, &entries);
    buf
}

fn encode_field(buf: &mut Vec<u8>, field: &Field<'_>) {
    match field {
        Field::Uint(n) => encode_uint(buf, 0, *n),
        Field::Int(i) => encode_integer(buf, *i),
        Field::Text(s) => encode_text(buf, s),
        Field::Bytes(b) => encode_bytes(buf, b),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(u64, Field<'_>)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Field<'_>)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_uint(&mut key_buf, 0, *k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);

    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_field(buf, value);
    }
}

/// Decode a token from canonical bytes.
///
/// Input that parses but does not re-encode to the identical bytes (extra
/// keys, duplicate keys, explicit zero timestamps, trailing data, long-form
/// integers) is rejected: the signature and fingerprint are only meaningful
/// over the canonical form.
pub fn decode_canonical(bytes: &[u8]) -> Result<Token, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    let token = cbor_value_to_token(&value)?;

    if canonical_bytes(&token) != bytes {
        return Err(CoreError::MalformedToken("non-canonical encoding".into()));
    }

    Ok(token)
}

/// Convert a CBOR Value (map) back to a Token.
fn cbor_value_to_token(value: &Value) -> Result<Token, CoreError> {
    let map = match value {
        Value::Map(m) => m,
        _ => return Err(CoreError::MalformedToken("expected map".into())),
    };

    let get = |key: u64| -> Option<&Value> {
        map.iter()
            .find(|(k, _)| matches!(k, Value::Integer(i) if i128::from(*i) == i128::from(key)))
            .map(|(_, v)| v)
    };

    match get(keys::VERSION) {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            let version = u64::try_from(n)
                .map_err(|_| CoreError::MalformedToken(format!("invalid version: {n}")))?;
            if version != SCHEMA_VERSION {
                return Err(CoreError::UnsupportedVersion(version));
            }
        }
        _ => return Err(CoreError::MalformedToken("missing version".into())),
    }

    let id = match get(keys::ID) {
        Some(Value::Text(s)) if !s.is_empty() => s.clone(),
        _ => return Err(CoreError::MalformedToken("missing id".into())),
    };

    let customer = optional_text(get(keys::CUSTOMER), "customer")?;
    let subscription = optional_text(get(keys::SUBSCRIPTION), "subscription")?;
    let kind = optional_text(get(keys::KIND), "kind")?;
    let issued_at = optional_int(get(keys::ISSUED_AT), "issued_at")?;
    let expires_at = optional_int(get(keys::EXPIRES_AT), "expires_at")?;

    let payload = match get(keys::PAYLOAD) {
        Some(Value::Bytes(b)) => b.clone(),
        None => Vec::new(),
        _ => return Err(CoreError::MalformedToken("invalid payload".into())),
    };

    Ok(Token {
        id,
        customer,
        subscription,
        kind,
        issued_at,
        expires_at,
        payload: payload.into(),
    })
}

fn optional_text(value: Option<&Value>, name: &str) -> Result<Option<String>, CoreError> {
    match value {
        Some(Value::Text(s)) => Ok(non_empty(s.clone())),
        None => Ok(None),
        _ => Err(CoreError::MalformedToken(format!("invalid {name}"))),
    }
}

fn optional_int(value: Option<&Value>, name: &str) -> Result<Option<i64>, CoreError> {
    match value {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            i64::try_from(n)
                .map(non_zero)
                .map_err(|_| CoreError::MalformedToken(format!("{name} out of range: {n}")))
        }
        None => Ok(None),
        _ => Err(CoreError::MalformedToken(format!("invalid {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_token() -> Token {
        Token::builder("f3a2b3e9-107a-498a-9b5d-24812371ee87")
            .customer("fa4dfb36-b26c-4921-95f5-ffa494e688c1")
            .subscription("31d853e6-d253-4782-adb6-35b85b482c93")
            .kind("online")
            .issued_at(1_736_870_400)
            .expires_at(1_736_874_000)
            .payload(br#"{"test":1}"#.to_vec())
            .build()
    }

    #[test]
    fn test_canonical_encoding_deterministic() {
        let token = full_token();
        assert_eq!(canonical_bytes(&token), canonical_bytes(&token.clone()));
    }

    #[test]
    fn test_minimal_token_layout() {
        let token = Token::builder("a").build();
        // map(2) { 0: 1, 1: "a" }
        assert_eq!(canonical_bytes(&token), vec![0xa2, 0x00, 0x01, 0x01, 0x61, b'a']);
    }

    #[test]
    fn test_negative_timestamp_encoding() {
        let token = Token::builder("a").issued_at(-1).build();
        let bytes = canonical_bytes(&token);
        // ... 5: -1
        assert_eq!(&bytes[bytes.len() - 2..], &[0x05, 0x20]);
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 65535);
        assert_eq!(buf, vec![0x19, 0xff, 0xff]);

        buf.clear();
        encode_uint(&mut buf, 0, 1_736_870_400);
        assert_eq!(buf, vec![0x1a, 0x67, 0x86, 0x8a, 0x00]);
    }

    #[test]
    fn test_token_roundtrip() {
        let token = full_token();
        let decoded = decode_canonical(&canonical_bytes(&token)).unwrap();
        assert_eq!(token, decoded);
    }

    #[test]
    fn test_roundtrip_matches_ciborium_view() {
        // Our encoder must produce bytes a general CBOR parser agrees with.
        let token = full_token();
        let value: Value = ciborium::from_reader(canonical_bytes(&token).as_slice()).unwrap();
        match value {
            Value::Map(entries) => assert_eq!(entries.len(), 8),
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let mut bytes = canonical_bytes(&Token::builder("a").build());
        bytes[2] = 0x02;
        assert!(matches!(
            decode_canonical(&bytes),
            Err(CoreError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = canonical_bytes(&Token::builder("a").build());
        bytes.push(0x00);
        assert!(decode_canonical(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_explicit_zero_expiry() {
        // map(3) { 0: 1, 1: "a", 6: 0 }
        let bytes = [0xa3, 0x00, 0x01, 0x01, 0x61, b'a', 0x06, 0x00];
        assert!(matches!(
            decode_canonical(&bytes),
            Err(CoreError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        // map(2) { 0: 1, 1: h'61' }
        let bytes = [0xa2, 0x00, 0x01, 0x01, 0x41, b'a'];
        assert!(decode_canonical(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_non_map_and_garbage() {
        assert!(decode_canonical(&[0x80]).is_err());
        assert!(decode_canonical(b"not cbor at all").is_err());
        assert!(decode_canonical(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_empty_id() {
        // map(2) { 0: 1, 1: "" }
        let bytes = [0xa2, 0x00, 0x01, 0x01, 0x60];
        assert!(matches!(
            decode_canonical(&bytes),
            Err(CoreError::MalformedToken(_))
        ));
    }
}
