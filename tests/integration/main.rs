//! Integration tests for Onpage-SEO
//!
//! These tests use wiremock to create mock HTTP servers and run the fetch
//! stage and the full pipeline against them.

mod fetch_tests;
mod pipeline_tests;

use onpage_seo::config::{Config, FetcherConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a fetcher configuration with short timeouts for testing
pub fn test_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        timeout_ms: 2_000,
        connect_timeout_ms: 1_000,
        max_redirects: 5,
        user_agent: "OnpageSeoTest/1.0".to_string(),
        ..FetcherConfig::default()
    }
}

/// Creates a full configuration around [`test_fetcher_config`]
pub fn test_config() -> Config {
    Config {
        fetcher: test_fetcher_config(),
        ..Config::default()
    }
}

/// Mounts an HTML page at `route` on the mock server
pub async fn mount_html(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}
