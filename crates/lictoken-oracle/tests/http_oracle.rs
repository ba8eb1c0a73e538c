//! HTTP channel against a live mock server.

#![cfg(feature = "http")]

use std::time::Duration;

use lictoken_core::Token;
use lictoken_oracle::{HttpOracle, Oracle, OracleConfig, ReqwestFetcher, RevocationClient, Verdict};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_published_fingerprint_is_verified() {
    let server = MockServer::start().await;
    let token = Token::builder("lic-1").customer("acme").build();

    Mock::given(method("GET"))
        .and(path("/licenses/lic-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}\n", token.fingerprint())))
        .expect(1)
        .mount(&server)
        .await;

    let oracle = HttpOracle::new(fetcher(), [format!("{}/licenses/", server.uri())]);
    assert_eq!(oracle.check("lic-1", &token.fingerprint()).await, Verdict::Verified);
}

#[tokio::test]
async fn test_error_status_counts_as_unreachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/licenses/lic-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let oracle = HttpOracle::new(fetcher(), [format!("{}/licenses", server.uri())]);
    assert_eq!(oracle.check("lic-1", "anything").await, Verdict::Unknown);
}

#[tokio::test]
async fn test_revoked_license_is_unverified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/licenses/lic-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let oracle = HttpOracle::new(fetcher(), [format!("{}/licenses", server.uri())]);
    assert_eq!(oracle.check("lic-1", "anything").await, Verdict::Unverified);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let oracle = HttpOracle::new(fetcher(), [server.uri()]).with_timeout(Duration::from_millis(100));
    assert_eq!(oracle.check("lic-1", "anything").await, Verdict::Unknown);
}

#[tokio::test]
async fn test_client_from_config() {
    let server = MockServer::start().await;
    let token = Token::builder("lic-2").expires_at(4_000_000_000).build();

    Mock::given(method("GET"))
        .and(path("/lic-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(token.fingerprint()))
        .mount(&server)
        .await;

    let config = OracleConfig::default()
        .with_http_endpoints([server.uri()])
        .with_lookup_timeout(Duration::from_secs(2));
    let client = RevocationClient::from_config(&config).unwrap();

    assert_eq!(client.len(), 1);
    assert!(client.verify_at(&token, 1_000).await);
}
