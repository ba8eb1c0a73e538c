//! Oracle client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for [`RevocationClient::from_config`](crate::RevocationClient::from_config).
///
/// DNS hosts are consulted before HTTP endpoints, each list in order.
///
/// ```json
/// {"dns_hosts": ["licenses.example.com"], "lookup_timeout_ms": 2000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// DNS zones queried as `<id>.<host>` TXT.
    pub dns_hosts: Vec<String>,
    /// HTTP base URLs queried as `GET <endpoint>/<id>`.
    pub http_endpoints: Vec<String>,
    /// Upper bound on each individual lookup. Serialized as whole
    /// milliseconds under `lookup_timeout_ms`.
    #[serde(rename = "lookup_timeout_ms", with = "duration_ms")]
    pub lookup_timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            dns_hosts: Vec::new(),
            http_endpoints: Vec::new(),
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

impl OracleConfig {
    /// Set the DNS hosts.
    pub fn with_dns_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dns_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the HTTP endpoints.
    pub fn with_http_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.http_endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
