//! In-memory resolver and fetcher for testing.
//!
//! Both record every query so tests can assert on lookup order.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::dns::TxtResolver;
use crate::error::{OracleError, Result};
use crate::http::HttpFetcher;

/// A canned answer.
#[derive(Debug, Clone)]
enum Answer<T> {
    Found(T),
    Fail,
}

/// [`TxtResolver`] answering from a fixed table.
///
/// Names without an entry resolve to no records.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    answers: HashMap<String, Answer<Vec<String>>>,
    delay: Option<Duration>,
    queries: RwLock<Vec<String>>,
}

impl MemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish TXT records at `name`.
    pub fn with_records<I, S>(mut self, name: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = records.into_iter().map(Into::into).collect();
        self.answers.insert(name.into(), Answer::Found(records));
        self
    }

    /// Make lookups of `name` fail.
    pub fn with_failure(mut self, name: impl Into<String>) -> Self {
        self.answers.insert(name.into(), Answer::Fail);
        self
    }

    /// Delay every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Names queried so far, in order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl TxtResolver for MemoryResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        self.queries.write().await.push(name.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.answers.get(name) {
            Some(Answer::Found(records)) => Ok(records.clone()),
            Some(Answer::Fail) => Err(OracleError::Dns {
                name: name.to_string(),
                message: "SERVFAIL".into(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// [`HttpFetcher`] answering from a fixed table.
///
/// URLs without an entry fail, as a 404 would.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    answers: HashMap<String, Answer<String>>,
    delay: Option<Duration>,
    queries: RwLock<Vec<String>>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.answers.insert(url.into(), Answer::Found(body.into()));
        self
    }

    /// Make requests to `url` fail.
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.answers.insert(url.into(), Answer::Fail);
        self
    }

    /// Delay every response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs fetched so far, in order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl HttpFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.queries.write().await.push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.answers.get(url) {
            Some(Answer::Found(body)) => Ok(body.clone()),
            Some(Answer::Fail) => Err(OracleError::Http {
                url: url.to_string(),
                message: "503 Service Unavailable".into(),
            }),
            None => Err(OracleError::Http {
                url: url.to_string(),
                message: "404 Not Found".into(),
            }),
        }
    }
}
