//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Times are pinned to a fixed
//! clock so expiry assertions do not depend on when the tests run.

use lictoken_core::{Ed25519PublicKey, Keypair, Token};

/// 2025-01-14T16:00:00Z.
pub const FIXED_NOW: i64 = 1_736_870_400;

const DAY: i64 = 24 * 60 * 60;

/// An issuer keypair and a pinned clock.
pub struct TestFixture {
    pub keypair: Keypair,
    now: i64,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            now: FIXED_NOW,
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            now: FIXED_NOW,
        }
    }

    /// The fixture's notion of the current time.
    pub fn now(&self) -> i64 {
        self.now
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// A token issued a day ago that expires in 30 days.
    pub fn valid_token(&self, id: &str) -> Token {
        Token::builder(id)
            .customer("cus_test")
            .subscription("sub_test")
            .kind("standard")
            .issued_at(self.now - DAY)
            .expires_at(self.now + 30 * DAY)
            .payload(&br#"{"seats":5}"#[..])
            .build()
    }

    /// A token whose validity ended yesterday.
    pub fn expired_token(&self, id: &str) -> Token {
        Token::builder(id)
            .issued_at(self.now - 31 * DAY)
            .expires_at(self.now - DAY)
            .build()
    }

    /// A token that never expires.
    pub fn perpetual_token(&self, id: &str) -> Token {
        Token::builder(id).issued_at(self.now - DAY).build()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures with distinct deterministic keys, e.g. for key rotation.
pub fn rotation_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 0xa5;
            TestFixture::with_seed(seed)
        })
        .collect()
}
