//! Golden test vectors for deterministic verification.
//!
//! Every field after `payload` was produced by an independent encoder from
//! the inputs above it. An implementation must reproduce the canonical
//! bytes, hash, fingerprint and signature exactly, and must accept the
//! license text. The license text itself is not expected to match
//! byte-for-byte, since DEFLATE encoders differ in their output.

use lictoken_core::{Keypair, Token};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    pub id: &'static str,
    pub customer: Option<&'static str>,
    pub subscription: Option<&'static str>,
    pub kind: Option<&'static str>,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub payload: &'static [u8],
    /// Expected issuer public key (hex).
    pub public_key: &'static str,
    /// Expected canonical token bytes (hex).
    pub canonical: &'static str,
    /// Expected SHA-256 of the canonical bytes (hex).
    pub sha256: &'static str,
    /// Expected fingerprint.
    pub fingerprint: &'static str,
    /// Expected Ed25519 signature over the canonical bytes (hex).
    pub signature: &'static str,
    /// A license for this token produced by another encoder.
    pub license: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "identifier only",
            seed: [0x00; 32],
            id: "lic-0001",
            customer: None,
            subscription: None,
            kind: None,
            issued_at: None,
            expires_at: None,
            payload: b"",
            public_key: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            canonical: "a2000101686c69632d30303031",
            sha256: "7a4a41116e8a0d043b737a7178638dbb1144d5a618d6120caf94f031ff63ba7b",
            fingerprint: "ekpBEW6KDQQ7c3pxeGONuxFE1aYY1hIMr5TwMf9juns",
            signature: "971f1234b7d1c9d2c102b81abe9f8068b99f4956cf386739af480608cad9aa7a\
                        9e574fe91361aa5123de79a5e1c1f24b0563acc3f40aafdad492f8f0a3512e05",
            license: "\
-----BEGIN LICENSE KEY-----
id: lic-0001

DczHDoIwAADQf+lZE6pB0Bsg4GBVlngxUApEhrTIivHf5f7yviAFB1Aji/OGwdvN
WGi04CMofkJRksBKqr05MDksnug7ByvQLbqaRNcystucGrLE8nho11Js1JkbJI6t
Y55xua6Y7EEbSgLu2aobnfquQ0h8L8bsYsih3Y1PdGV75pfDa3xDtZfRkhdLTspW
VsPd9YiQgLftRHTb6idNhXEUweJsMt4bzWz/6psO/P4=
-----END LICENSE KEY-----
",
        },
        GoldenVector {
            name: "all fields",
            seed: [0x42; 32],
            id: "lic-2025-0042",
            customer: Some("cus_Acme"),
            subscription: Some("sub_12345"),
            kind: Some("enterprise"),
            issued_at: Some(1_736_870_400),
            expires_at: Some(1_768_406_400),
            payload: br#"{"seats":25}"#,
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            canonical: "a80001016d6c69632d323032352d3030343202686375735f41636d6503697375\
                        625f3132333435046a656e7465727072697365051a67868a00061a6967bd8007\
                        4c7b227365617473223a32357d",
            sha256: "b0af748cd2d9eb58e4d6948eeccd933eefb0a120090b2c8ead31bc4de174cd34",
            fingerprint: "sK90jNLZ61jk1pSO7M2TPu-woSAJCyyOrTG8TeF0zTQ",
            signature: "1cdf620083c9a385bf1254fbc8c27aedb35f7923ae0d36c8a7d75904a1bfa122\
                        51da5a929cbe31905c806da3bad7c23bd718fb1234e33adca9b1508f478a5103",
            license: "\
-----BEGIN LICENSE KEY-----
id: lic-2025-0042

Dc7bboIwAADQf+F5JNKBhb0VtAwUirSRhJeGDohcFCoQLcv+ffzAyfnVSu1LQx2+
O6XS8YGKssYi56CIXDCrDGF0tW71BYiSr9wgck2SyeIFHzphSZlBvfQaO+xOBT0+
rP7nrSrDgs6d1iuSmaxQbaVPIRt96ZcQfLp4Bvfa9c3IJ1l8eC34pn1o01b4jp0G
BUk4mBk/9gyqKNxDEdcVJcuBiWB0ytw9+XygYQp6SR9n891hhURB9oYdQOPdwmPL
WjKrcbp6SWqOKXpt+G3Dp5Oza+NzvjfazhgpgRFgyaK/BopCTynyZL7NKrxb2UX7
+wc=
-----END LICENSE KEY-----
",
        },
        GoldenVector {
            name: "perpetual with binary payload",
            seed: [0x42; 32],
            id: "lic-perpetual",
            customer: None,
            subscription: None,
            kind: None,
            issued_at: Some(1_736_870_400),
            expires_at: None,
            payload: &[0x00, 0x01, 0x02],
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            canonical: "a40001016d6c69632d70657270657475616c051a67868a000743000102",
            sha256: "405a3451837e942b69c6aa81cbf048de4abd623c8abb6c8861ce66ee5a0bae57",
            fingerprint: "QFo0UYN-lCtpxqqBy_BI3kq9YjyKu2yIYc5m7loLrlc",
            signature: "0471d5f0b824bb7ee3d807eeb3734509163763423ecc81b22ef7b6784bb02e0d\
                        7d8f2c86c1b84e2c5df0f62f34c96b8077b58baa6e249e8d8c311cbd18c4ea09",
            license: "\
-----BEGIN LICENSE KEY-----
id: lic-perpetual

FczRToMwFADQf+mzSxhl6fANqkBDmYJTqC9LpGOTMqBsBS7Gf3eeDzg/SKJH5C8z
7pci3sSq8tRIBlGMrF0fjJRj60R1ldGq9J76Wzx9BvMboUPKnVxC99oW6AFd/4so
+tjykzKY1LZXmSveBTQTWFhstbAQ+Hi0j89m4qe1WwOE09f5hQd4cr+3FuTGkyTn
+uKotrOTJAM3TPaapvf8fM/ToLPexW7V0Fs/a+3DwWdYaVfUEBsbmCg3F9J0fGhK
9PsH
-----END LICENSE KEY-----
",
        },
    ]
}

/// Build the vector's token.
pub fn token_from_vector(vector: &GoldenVector) -> Token {
    let mut builder = Token::builder(vector.id).payload(vector.payload);

    if let Some(customer) = vector.customer {
        builder = builder.customer(customer);
    }
    if let Some(subscription) = vector.subscription {
        builder = builder.subscription(subscription);
    }
    if let Some(kind) = vector.kind {
        builder = builder.kind(kind);
    }
    if let Some(issued_at) = vector.issued_at {
        builder = builder.issued_at(issued_at);
    }
    if let Some(expires_at) = vector.expires_at {
        builder = builder.expires_at(expires_at);
    }

    builder.build()
}

/// The vector's issuer keypair.
pub fn keypair_from_vector(vector: &GoldenVector) -> Keypair {
    Keypair::from_seed(&vector.seed)
}

/// Check every vector's deterministic outputs.
///
/// Returns `(name, matches, first mismatching field)`.
pub fn verify_all_vectors() -> Vec<(String, bool, Option<&'static str>)> {
    all_vectors()
        .iter()
        .map(|v| {
            let token = token_from_vector(v);
            let keypair = keypair_from_vector(v);
            let canonical = token.canonical_bytes();

            let checks = [
                ("public_key", keypair.public_key().to_hex() == v.public_key),
                ("canonical", hex::encode(&canonical) == v.canonical),
                ("sha256", token.content_hash().to_hex() == v.sha256),
                ("fingerprint", token.fingerprint() == v.fingerprint),
                ("signature", keypair.sign(&canonical).to_hex() == v.signature),
            ];
            let mismatch = checks.iter().find(|(_, ok)| !ok).map(|(field, _)| *field);

            (v.name.to_string(), mismatch.is_none(), mismatch)
        })
        .collect()
}
