//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lictoken_core::{Ed25519PublicKey, Keypair, Token};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a token identifier. Never empty, never contains a line break.
///
/// Mostly slug-like ids, plus ids with edge whitespace, colons, non-ASCII
/// text, and whitespace-only ids.
pub fn token_id() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9][A-Za-z0-9_.-]{0,47}",
        2 => "[ \t]{0,2}[A-Za-z0-9:é/ _.-]{1,32}[ \t]{0,2}",
        1 => "[ \t]{1,4}",
    ]
}

/// Generate an optional classification string.
pub fn label() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z_]{1,16}".prop_map(String::from))
}

/// Generate a reasonable issue time.
pub fn timestamp() -> impl Strategy<Value = i64> {
    1i64..=4_000_000_000i64
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for generating a valid token.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub id: String,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    pub kind: Option<String>,
    pub issued_at: Option<i64>,
    /// Seconds after the issue time; `None` never expires.
    pub lifetime: Option<i64>,
    pub payload: Vec<u8>,
}

impl Arbitrary for TokenParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            token_id(),
            label(),
            label(),
            label(),
            proptest::option::of(timestamp()),
            proptest::option::of(1i64..=10 * 365 * 86_400),
            payload(512),
        )
            .prop_map(
                |(id, customer, subscription, kind, issued_at, lifetime, payload)| TokenParams {
                    id,
                    customer,
                    subscription,
                    kind,
                    issued_at,
                    lifetime,
                    payload,
                },
            )
            .boxed()
    }
}

/// Build a token from parameters. The result always passes validation.
pub fn token_from_params(params: &TokenParams) -> Token {
    let mut builder = Token::builder(params.id.clone()).payload(params.payload.clone());

    if let Some(customer) = &params.customer {
        builder = builder.customer(customer.clone());
    }
    if let Some(subscription) = &params.subscription {
        builder = builder.subscription(subscription.clone());
    }
    if let Some(kind) = &params.kind {
        builder = builder.kind(kind.clone());
    }
    if let Some(issued_at) = params.issued_at {
        builder = builder.issued_at(issued_at);
    }
    if let Some(lifetime) = params.lifetime {
        builder = builder.expires_at(params.issued_at.unwrap_or(0) + lifetime);
    }

    builder.build()
}
