//! The envelope: a JSON object carrying the sealed token, its signature and
//! its content hash.
//!
//! ```json
//! {"d":"<ciphertext>","s":"<signature>","h":"<hash>"}
//! ```
//!
//! Each value is unpadded base64url.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SealError};

/// Names the envelope field a decoding error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeField {
    Ciphertext,
    Signature,
    Hash,
}

impl EnvelopeField {
    /// The JSON key of this field.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ciphertext => "d",
            Self::Signature => "s",
            Self::Hash => "h",
        }
    }
}

impl fmt::Display for EnvelopeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The serialized envelope, fields still base64url encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    #[serde(rename = "d")]
    pub ciphertext: String,
    #[serde(rename = "s")]
    pub signature: String,
    #[serde(rename = "h")]
    pub hash: String,
}

/// Decoded envelope contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeParts {
    pub ciphertext: Vec<u8>,
    pub signature: Vec<u8>,
    pub hash: Vec<u8>,
}

impl Envelope {
    /// Build an envelope from raw bytes.
    pub fn new(ciphertext: &[u8], signature: &[u8], hash: &[u8]) -> Self {
        Self {
            ciphertext: URL_SAFE_NO_PAD.encode(ciphertext),
            signature: URL_SAFE_NO_PAD.encode(signature),
            hash: URL_SAFE_NO_PAD.encode(hash),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SealError::Serialization(e.to_string()))
    }

    /// Parse from JSON bytes. All three fields are required.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| SealError::Serialization(e.to_string()))
    }

    /// Decode the three fields. Signature first, then hash, then ciphertext;
    /// the first malformed field is the one reported.
    pub fn decode_parts(&self) -> Result<EnvelopeParts> {
        let signature = decode_field(EnvelopeField::Signature, &self.signature)?;
        let hash = decode_field(EnvelopeField::Hash, &self.hash)?;
        let ciphertext = decode_field(EnvelopeField::Ciphertext, &self.ciphertext)?;
        Ok(EnvelopeParts {
            ciphertext,
            signature,
            hash,
        })
    }
}

fn decode_field(field: EnvelopeField, value: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| SealError::Base64 {
            field,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let envelope = Envelope::new(b"cipher", b"sig", &[0xfb, 0xff]);
        let json = String::from_utf8(envelope.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"d":"Y2lwaGVy","s":"c2ln","h":"-_8"}"#);
    }

    #[test]
    fn test_parse_and_decode() {
        let envelope = Envelope::from_bytes(br#"{"h":"-_8","s":"c2ln","d":"Y2lwaGVy"}"#).unwrap();
        let parts = envelope.decode_parts().unwrap();
        assert_eq!(parts.ciphertext, b"cipher");
        assert_eq!(parts.signature, b"sig");
        assert_eq!(parts.hash, vec![0xfb, 0xff]);
    }

    #[test]
    fn test_missing_or_unknown_fields_rejected() {
        assert!(matches!(
            Envelope::from_bytes(br#"{"d":"","s":""}"#),
            Err(SealError::Serialization(_))
        ));
        assert!(matches!(
            Envelope::from_bytes(br#"{"d":"","s":"","h":"","x":""}"#),
            Err(SealError::Serialization(_))
        ));
        assert!(matches!(Envelope::from_bytes(b"not json"), Err(SealError::Serialization(_))));
    }

    #[test]
    fn test_padded_or_standard_alphabet_rejected() {
        let padded = Envelope {
            ciphertext: "Y2lwaGVy".into(),
            signature: "c2ln".into(),
            hash: "-_8=".into(),
        };
        assert!(matches!(
            padded.decode_parts(),
            Err(SealError::Base64 { field: EnvelopeField::Hash, .. })
        ));

        let standard = Envelope {
            ciphertext: "Y2lwaGVy".into(),
            signature: "+/8".into(),
            hash: "-_8".into(),
        };
        assert!(matches!(
            standard.decode_parts(),
            Err(SealError::Base64 { field: EnvelopeField::Signature, .. })
        ));
    }

    #[test]
    fn test_signature_reported_before_other_fields() {
        let envelope = Envelope {
            ciphertext: "!".into(),
            signature: "!".into(),
            hash: "!".into(),
        };
        assert!(matches!(
            envelope.decode_parts(),
            Err(SealError::Base64 { field: EnvelopeField::Signature, .. })
        ));

        let envelope = Envelope {
            ciphertext: "!".into(),
            signature: "".into(),
            hash: "".into(),
        };
        assert!(matches!(
            envelope.decode_parts(),
            Err(SealError::Base64 { field: EnvelopeField::Ciphertext, .. })
        ));
    }

    #[test]
    fn test_field_display() {
        assert_eq!(EnvelopeField::Ciphertext.to_string(), "d");
        assert_eq!(EnvelopeField::Signature.to_string(), "s");
        assert_eq!(EnvelopeField::Hash.to_string(), "h");
    }
}
