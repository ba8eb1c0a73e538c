//! Modified, forged and malformed licenses must be rejected.

use lictoken::armor::{self, ArmoredBlock};
use lictoken::core::{Keypair, Sha256Hash};
use lictoken::{decode, encode, ErrorKind, LicenseError, HEADER_ID, LICENSE_LABEL};
use lictoken_seal::{compress, decompress, seal, Envelope};
use lictoken_testkit::TestFixture;

fn issue(fixture: &TestFixture, id: &str) -> String {
    encode(&fixture.valid_token(id), Some(&fixture.keypair)).unwrap()
}

fn armor_payload(payload: &[u8]) -> String {
    ArmoredBlock::new(LICENSE_LABEL, payload)
        .with_header(HEADER_ID, "lic-1")
        .to_text()
        .unwrap()
}

fn armor_envelope(envelope: &Envelope) -> String {
    armor_payload(&compress(&envelope.to_bytes().unwrap()).unwrap())
}

fn kind_of(text: &str, fixture: &TestFixture) -> ErrorKind {
    decode(text, &[fixture.public_key()]).unwrap_err().kind()
}

#[test]
fn test_every_payload_byte_is_protected() {
    let fixture = TestFixture::new();
    let token = fixture.valid_token("lic-1");
    let text = encode(&token, Some(&fixture.keypair)).unwrap();
    let block = armor::unwrap(&text, LICENSE_LABEL).unwrap();

    for i in 0..block.payload.len() {
        let mut tampered = block.clone();
        tampered.payload[i] ^= 0xff;
        let text = tampered.to_text().unwrap();

        assert!(decode(&text, &[fixture.public_key()]).is_err(), "flip at byte {i}");

        // Without keys the upper half of the signature is unchecked, so a
        // flip there may decode. It must still yield the issued token.
        if let Ok(decoded) = decode(&text, &[]) {
            assert_eq!(decoded, token, "flip at byte {i}, unverified");
        }
    }
}

#[test]
fn test_every_envelope_field_is_protected() {
    let fixture = TestFixture::new();
    let text = issue(&fixture, "lic-1");
    let block = armor::unwrap(&text, LICENSE_LABEL).unwrap();
    let envelope = Envelope::from_bytes(&decompress(&block.payload).unwrap()).unwrap();
    let parts = envelope.decode_parts().unwrap();

    for i in 0..parts.ciphertext.len() {
        let mut ciphertext = parts.ciphertext.clone();
        ciphertext[i] ^= 0x01;
        let forged = Envelope::new(&ciphertext, &parts.signature, &parts.hash);
        assert_eq!(
            kind_of(&armor_envelope(&forged), &fixture),
            ErrorKind::AuthenticationFailure,
            "ciphertext byte {i}"
        );
    }

    for i in 0..parts.signature.len() {
        let mut signature = parts.signature.clone();
        signature[i] ^= 0x01;
        let forged = Envelope::new(&parts.ciphertext, &signature, &parts.hash);
        let kind = kind_of(&armor_envelope(&forged), &fixture);
        // The first 32 bytes double as the cipher key.
        let expected = if i < 32 {
            ErrorKind::AuthenticationFailure
        } else {
            ErrorKind::SignatureInvalid
        };
        assert_eq!(kind, expected, "signature byte {i}");
    }

    for i in 0..parts.hash.len() {
        let mut hash = parts.hash.clone();
        hash[i] ^= 0x01;
        let forged = Envelope::new(&parts.ciphertext, &parts.signature, &hash);
        let kind = kind_of(&armor_envelope(&forged), &fixture);
        // The first 12 bytes double as the nonce.
        let expected = if i < 12 {
            ErrorKind::AuthenticationFailure
        } else {
            ErrorKind::ChecksumMismatch
        };
        assert_eq!(kind, expected, "hash byte {i}");
    }
}

#[test]
fn test_resealed_with_wrong_declared_hash() {
    let fixture = TestFixture::new();
    let data = fixture.valid_token("lic-1").canonical_bytes();
    let signature = fixture.keypair.sign(&data);
    let declared = Sha256Hash::hash(b"something else");

    let ciphertext = seal(&data, signature.as_bytes(), declared.as_bytes()).unwrap();
    let forged = Envelope::new(&ciphertext, signature.as_bytes(), declared.as_bytes());

    assert_eq!(kind_of(&armor_envelope(&forged), &fixture), ErrorKind::ChecksumMismatch);
}

#[test]
fn test_signature_tail_only_checked_with_keys() {
    let fixture = TestFixture::new();
    let token = fixture.valid_token("lic-1");
    let data = token.canonical_bytes();
    let hash = Sha256Hash::hash(&data);
    let mut signature = fixture.keypair.sign(&data).as_bytes().to_vec();
    signature[63] ^= 0x01;

    let ciphertext = seal(&data, &signature, hash.as_bytes()).unwrap();
    let text = armor_envelope(&Envelope::new(&ciphertext, &signature, hash.as_bytes()));

    assert_eq!(kind_of(&text, &fixture), ErrorKind::SignatureInvalid);
    assert_eq!(decode(&text, &[]).unwrap(), token);
}

#[test]
fn test_forged_by_untrusted_key() {
    let fixture = TestFixture::new();
    let attacker = Keypair::generate();
    let text = encode(&fixture.valid_token("lic-1"), Some(&attacker)).unwrap();

    assert_eq!(kind_of(&text, &fixture), ErrorKind::SignatureInvalid);
    // Without trusted keys the forgery is indistinguishable.
    assert!(decode(&text, &[]).is_ok());
}

#[test]
fn test_identifier_binding() {
    let fixture = TestFixture::new();
    let text = issue(&fixture, "original-id");
    let block = armor::unwrap(&text, LICENSE_LABEL).unwrap();

    let relabeled = block.clone().with_header(HEADER_ID, "different-id").to_text().unwrap();
    let err = decode(&relabeled, &[fixture.public_key()]).unwrap_err();
    assert!(matches!(
        err,
        LicenseError::IdentifierMismatch { ref header, ref token }
            if header.as_deref() == Some("different-id") && token == "original-id"
    ));

    let mut unlabeled = block.clone();
    unlabeled.headers.clear();
    assert_eq!(
        kind_of(&unlabeled.to_text().unwrap(), &fixture),
        ErrorKind::IdentifierMismatch
    );

    // Extra headers are carried but do not affect verification.
    let annotated = block.with_header("note", "issued by support").to_text().unwrap();
    assert!(decode(&annotated, &[fixture.public_key()]).is_ok());
}

#[test]
fn test_malformed_containers() {
    let fixture = TestFixture::new();
    let cases = [
        "",
        "not a valid license",
        "-----BEGIN CERTIFICATE-----\nMIIBkTCB+wIJAMlyFqk69v+9MA0GCSqGSIb3DQEBCwUAMBQxEjAQBgNVBAMTCWxv\n-----END CERTIFICATE-----",
        "-----BEGIN LICENSE KEY-----\nid: lic-1\n\nAAAA\n",
    ];

    for text in cases {
        assert_eq!(kind_of(text, &fixture), ErrorKind::MalformedContainer, "{text:?}");
    }
}

#[test]
fn test_corrupted_body() {
    let fixture = TestFixture::new();
    assert!(decode(armor_payload(b"corrupted data"), &[fixture.public_key()]).is_err());
    assert_eq!(
        kind_of(&armor_payload(&[0x07, 0x00]), &fixture),
        ErrorKind::DecompressFailure
    );

    let packed = compress(b"{\"d\":\"\",\"s\":\"\",\"h\":\"\"}").unwrap();
    assert_eq!(
        kind_of(&armor_payload(&packed[..packed.len() - 1]), &fixture),
        ErrorKind::DecompressFailure
    );
}

#[test]
fn test_malformed_envelopes() {
    let fixture = TestFixture::new();
    let json_cases: [&[u8]; 3] = [
        b"not valid json",
        br#"{"d":"dGVzdA","s":"dGVzdA"}"#,
        br#"["dGVzdA","dGVzdA","dGVzdA"]"#,
    ];

    for json in json_cases {
        let text = armor_payload(&compress(json).unwrap());
        assert_eq!(kind_of(&text, &fixture), ErrorKind::DecodeFailure);
    }
}

#[test]
fn test_invalid_base64_fields() {
    let fixture = TestFixture::new();
    let valid = "dGVzdA";
    let invalid = "invalid base64 !!!";

    for (d, s, h, field) in [
        (valid, invalid, valid, "field s"),
        (valid, valid, invalid, "field h"),
        (invalid, valid, valid, "field d"),
    ] {
        let envelope = Envelope {
            ciphertext: d.into(),
            signature: s.into(),
            hash: h.into(),
        };
        let err = decode(armor_envelope(&envelope), &[fixture.public_key()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
        assert!(err.to_string().contains(field), "{err} should name {field}");
    }
}

#[test]
fn test_signature_too_short_for_key() {
    let fixture = TestFixture::new();
    let envelope = Envelope::new(b"test", b"test", b"test");
    assert_eq!(kind_of(&armor_envelope(&envelope), &fixture), ErrorKind::DecodeFailure);
}

#[test]
fn test_valid_seal_around_garbage_token() {
    // Every check before deserialization passes, but the plaintext is not a token.
    let fixture = TestFixture::new();
    let data = b"not a cbor token".to_vec();
    let hash = Sha256Hash::hash(&data);
    let signature = fixture.keypair.sign(&data);
    let ciphertext = seal(&data, signature.as_bytes(), hash.as_bytes()).unwrap();
    let envelope = Envelope::new(&ciphertext, signature.as_bytes(), hash.as_bytes());

    assert_eq!(kind_of(&armor_envelope(&envelope), &fixture), ErrorKind::DecodeFailure);
}
