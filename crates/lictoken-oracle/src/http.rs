//! HTTP channel.
//!
//! For token `id` the oracle fetches `<endpoint>/<id>` and treats each line
//! of the response body as a published fingerprint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{OracleError, Result};
use crate::oracle::{matches_fingerprint, Oracle, Verdict};

/// Fetches a URL and returns the response body.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url`. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Oracle backed by one or more HTTP endpoints.
pub struct HttpOracle<F: HttpFetcher> {
    fetcher: F,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl<F: HttpFetcher> HttpOracle<F> {
    /// Create an oracle querying `endpoints` in order.
    pub fn new<I, S>(fetcher: F, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fetcher,
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoints consulted, in order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        tokio::time::timeout(self.timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }
}

/// `<endpoint>/<id>`, with at most one slash between the two and the id
/// percent-encoded as a single path segment.
///
/// `.` and `..` cannot be sent as a segment: URL parsers fold them away
/// even when percent-encoded.
pub(crate) fn token_url(endpoint: &str, id: &str) -> Result<String> {
    let url = format!("{}/{}", endpoint.trim_end_matches('/'), urlencoding::encode(id));
    if matches!(id, "." | "..") {
        return Err(OracleError::Http {
            url,
            message: "identifier is not a usable path segment".into(),
        });
    }
    Ok(url)
}

#[async_trait]
impl<F: HttpFetcher> Oracle for HttpOracle<F> {
    fn name(&self) -> &str {
        "http"
    }

    async fn check(&self, id: &str, fingerprint: &str) -> Verdict {
        let mut answered = false;

        for endpoint in &self.endpoints {
            let url = match token_url(endpoint, id) {
                Ok(url) => url,
                Err(e) => {
                    warn!(%endpoint, error = %e, "cannot address token, trying next endpoint");
                    continue;
                }
            };
            match self.fetch(&url).await {
                Ok(body) => {
                    answered = true;
                    if matches_fingerprint(body.lines(), fingerprint) {
                        debug!(%url, "fingerprint published");
                        return Verdict::Verified;
                    }
                    debug!(%url, "no matching line in response");
                }
                Err(e) => {
                    warn!(%url, error = %e, "HTTP lookup failed, trying next endpoint");
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

#[cfg(feature = "http")]
pub use self::reqwest_fetcher::ReqwestFetcher;

#[cfg(feature = "http")]
mod reqwest_fetcher {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::HttpFetcher;
    use crate::error::{OracleError, Result};

    /// [`HttpFetcher`] over a shared `reqwest` client with rustls.
    #[derive(Clone)]
    pub struct ReqwestFetcher {
        client: reqwest::Client,
    }

    impl ReqwestFetcher {
        /// Build a client whose requests are bounded by `timeout`.
        pub fn new(timeout: Duration) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| OracleError::Config(format!("http client: {e}")))?;
            Ok(Self { client })
        }

        /// Wrap an existing client.
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl HttpFetcher for ReqwestFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let http_error = |e: reqwest::Error| OracleError::Http {
                url: url.to_string(),
                message: e.to_string(),
            };

            self.client
                .get(url)
                .send()
                .await
                .map_err(http_error)?
                .error_for_status()
                .map_err(http_error)?
                .text()
                .await
                .map_err(http_error)
        }
    }
}
