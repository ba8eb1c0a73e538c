//! DNS TXT channel.
//!
//! For token `id` and zone `host` the oracle queries `<id>.<host>` and looks
//! for a TXT record equal to the token fingerprint. Issuers publish the
//! record while the license is valid and remove it to revoke.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{OracleError, Result};
use crate::oracle::{matches_fingerprint, Oracle, Verdict};

/// Resolves TXT records.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    /// Look up the TXT records at `name`. Multi-string records are joined.
    ///
    /// A name with no records resolves to an empty list, not an error.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>>;
}

/// Oracle backed by TXT records under one or more DNS zones.
pub struct DnsOracle<R: TxtResolver> {
    resolver: R,
    hosts: Vec<String>,
    timeout: Duration,
}

impl<R: TxtResolver> DnsOracle<R> {
    /// Create an oracle querying `hosts` in order.
    pub fn new<I, S>(resolver: R, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resolver,
            hosts: hosts.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The zones consulted, in order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    async fn lookup(&self, name: &str) -> Result<Vec<String>> {
        tokio::time::timeout(self.timeout, self.resolver.lookup_txt(name))
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl<R: TxtResolver> Oracle for DnsOracle<R> {
    fn name(&self) -> &str {
        "dns"
    }

    async fn check(&self, id: &str, fingerprint: &str) -> Verdict {
        let mut answered = false;

        for host in &self.hosts {
            let name = format!("{id}.{host}");
            match self.lookup(&name).await {
                Ok(records) => {
                    answered = true;
                    if matches_fingerprint(records.iter().map(String::as_str), fingerprint) {
                        debug!(%name, "fingerprint published");
                        return Verdict::Verified;
                    }
                    debug!(%name, records = records.len(), "no matching TXT record");
                }
                Err(e) => {
                    warn!(%name, error = %e, "TXT lookup failed, trying next host");
                }
            }
        }

        if answered {
            Verdict::Unverified
        } else {
            Verdict::Unknown
        }
    }
}

#[cfg(feature = "dns")]
pub use self::hickory::HickoryResolver;

#[cfg(feature = "dns")]
mod hickory {
    use std::time::Duration;

    use async_trait::async_trait;
    use hickory_resolver::error::ResolveErrorKind;
    use hickory_resolver::TokioAsyncResolver;

    use super::TxtResolver;
    use crate::error::{OracleError, Result};

    /// [`TxtResolver`] using the system's resolver configuration.
    pub struct HickoryResolver {
        inner: TokioAsyncResolver,
    }

    impl HickoryResolver {
        /// Read the system configuration (`/etc/resolv.conf` or platform
        /// equivalent) and apply `timeout` to each query.
        pub fn from_system_conf(timeout: Duration) -> Result<Self> {
            let (config, mut opts) = hickory_resolver::system_conf::read_system_conf()
                .map_err(|e| OracleError::Config(format!("system resolver config: {e}")))?;
            opts.timeout = timeout;
            Ok(Self {
                inner: TokioAsyncResolver::tokio(config, opts),
            })
        }

        /// Wrap an existing resolver.
        pub fn from_resolver(inner: TokioAsyncResolver) -> Self {
            Self { inner }
        }
    }

    #[async_trait]
    impl TxtResolver for HickoryResolver {
        async fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
            match self.inner.txt_lookup(name).await {
                Ok(lookup) => Ok(lookup
                    .iter()
                    .map(|txt| {
                        txt.txt_data()
                            .iter()
                            .map(|chunk| String::from_utf8_lossy(chunk))
                            .collect::<String>()
                    })
                    .collect()),
                Err(e) => match e.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                    _ => Err(OracleError::Dns {
                        name: name.to_string(),
                        message: e.to_string(),
                    }),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryResolver;

    const FP: &str = "ungWv48Bz-pBQUDeXa4iI7ADYaOWF3qctBD_YfIAFa0";

    #[tokio::test]
    async fn test_verified_on_exact_record() {
        let resolver = MemoryResolver::new()
            .with_records("lic-1.licenses.example.com", ["unrelated", FP]);
        let oracle = DnsOracle::new(resolver, ["licenses.example.com"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Verified);
    }

    #[tokio::test]
    async fn test_records_are_trimmed() {
        let padded = format!("  {FP}\n");
        let resolver =
            MemoryResolver::new().with_records("lic-1.licenses.example.com", [padded.as_str()]);
        let oracle = DnsOracle::new(resolver, ["licenses.example.com"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Verified);
    }

    #[tokio::test]
    async fn test_unverified_when_answered_without_match() {
        let resolver = MemoryResolver::new()
            .with_records("lic-1.licenses.example.com", ["something-else"]);
        let oracle = DnsOracle::new(resolver, ["licenses.example.com"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Unverified);
        // Unknown names resolve to no records.
        assert_eq!(oracle.check("lic-2", FP).await, Verdict::Unverified);
    }

    #[tokio::test]
    async fn test_failed_host_is_skipped() {
        let resolver = MemoryResolver::new()
            .with_failure("lic-1.primary.example.com")
            .with_records("lic-1.backup.example.com", [FP]);
        let oracle = DnsOracle::new(resolver, ["primary.example.com", "backup.example.com"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Verified);
    }

    #[tokio::test]
    async fn test_unknown_when_every_host_fails() {
        let resolver = MemoryResolver::new()
            .with_failure("lic-1.primary.example.com")
            .with_failure("lic-1.backup.example.com");
        let oracle = DnsOracle::new(resolver, ["primary.example.com", "backup.example.com"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Unknown);
    }

    #[tokio::test]
    async fn test_no_hosts_is_unknown() {
        let oracle = DnsOracle::new(MemoryResolver::new(), Vec::<String>::new());
        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Unknown);
    }

    #[tokio::test]
    async fn test_hosts_queried_in_order_until_match() {
        let resolver = MemoryResolver::new()
            .with_records("lic-1.a.example", ["nope"])
            .with_records("lic-1.b.example", [FP])
            .with_records("lic-1.c.example", [FP]);
        let oracle = DnsOracle::new(resolver, ["a.example", "b.example", "c.example"]);

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Verified);
        assert_eq!(
            oracle.resolver.queries().await,
            vec!["lic-1.a.example", "lic-1.b.example"]
        );
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let resolver = MemoryResolver::new()
            .with_records("lic-1.slow.example", [FP])
            .with_delay(Duration::from_secs(10));
        let oracle =
            DnsOracle::new(resolver, ["slow.example"]).with_timeout(Duration::from_millis(20));

        assert_eq!(oracle.check("lic-1", FP).await, Verdict::Unknown);
    }
}
