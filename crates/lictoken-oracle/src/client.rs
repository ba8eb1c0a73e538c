//! Revocation client: consults oracles in priority order.

use lictoken_core::{now_secs, Token};
use tracing::{debug, warn};

use crate::config::OracleConfig;
use crate::error::Result;
use crate::oracle::{Oracle, Verdict};

/// Asks out-of-band oracles whether a decoded token is still valid.
///
/// An expired token is never valid. Otherwise the token's fingerprint is
/// checked against each oracle in order and the first
/// [`Verdict::Verified`] wins. Lookups are sequential and never retried.
#[derive(Default)]
pub struct RevocationClient {
    oracles: Vec<Box<dyn Oracle>>,
}

impl RevocationClient {
    /// Create a client with no oracles. It vouches for nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configured channels: DNS hosts first, then HTTP endpoints.
    ///
    /// A channel whose cargo feature is disabled is skipped with a warning.
    pub fn from_config(config: &OracleConfig) -> Result<Self> {
        let mut client = Self::new();

        if !config.dns_hosts.is_empty() {
            #[cfg(feature = "dns")]
            {
                let resolver =
                    crate::dns::HickoryResolver::from_system_conf(config.lookup_timeout)?;
                client.push(
                    crate::dns::DnsOracle::new(resolver, config.dns_hosts.iter().cloned())
                        .with_timeout(config.lookup_timeout),
                );
            }
            #[cfg(not(feature = "dns"))]
            {
                warn!(hosts = config.dns_hosts.len(), "dns feature disabled, ignoring DNS hosts");
            }
        }

        if !config.http_endpoints.is_empty() {
            #[cfg(feature = "http")]
            {
                let fetcher = crate::http::ReqwestFetcher::new(config.lookup_timeout)?;
                client.push(
                    crate::http::HttpOracle::new(fetcher, config.http_endpoints.iter().cloned())
                        .with_timeout(config.lookup_timeout),
                );
            }
            #[cfg(not(feature = "http"))]
            {
                warn!(
                    endpoints = config.http_endpoints.len(),
                    "http feature disabled, ignoring HTTP endpoints"
                );
            }
        }

        Ok(client)
    }

    /// Append an oracle at the lowest priority.
    pub fn push(&mut self, oracle: impl Oracle + 'static) {
        self.oracles.push(Box::new(oracle));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_oracle(mut self, oracle: impl Oracle + 'static) -> Self {
        self.push(oracle);
        self
    }

    /// Number of configured oracles.
    pub fn len(&self) -> usize {
        self.oracles.len()
    }

    /// Whether no oracles are configured.
    pub fn is_empty(&self) -> bool {
        self.oracles.is_empty()
    }

    /// Check `token` against the system clock.
    pub async fn verify(&self, token: &Token) -> bool {
        self.verify_at(token, now_secs()).await
    }

    /// Check `token` as of `now` (Unix seconds).
    pub async fn verify_at(&self, token: &Token, now: i64) -> bool {
        if token.has_expired(now) {
            debug!(id = token.id(), "token expired, not consulting oracles");
            return false;
        }

        if self.oracles.is_empty() {
            warn!(id = token.id(), "no revocation oracles configured");
            return false;
        }

        let fingerprint = token.fingerprint();
        for oracle in &self.oracles {
            let verdict = oracle.check(token.id(), &fingerprint).await;
            debug!(id = token.id(), oracle = oracle.name(), ?verdict, "oracle consulted");
            if verdict == Verdict::Verified {
                return true;
            }
        }

        false
    }
}
