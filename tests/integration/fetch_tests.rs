//! Fetch stage against a live mock server

use crate::{mount_html, test_fetcher_config};
use onpage_seo::config::FetcherConfig;
use onpage_seo::{FetchError, HttpFetcher, PageSource};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(config: &FetcherConfig) -> HttpFetcher {
    HttpFetcher::new(config).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_success_metadata() {
    let mock_server = MockServer::start().await;
    let html = "<html><head><title>Hello</title></head><body>Hi</body></html>";
    mount_html(&mock_server, "/page", html).await;

    let url = format!("{}/page", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await.unwrap();

    assert_eq!(result.url, url);
    assert_eq!(result.final_url, url);
    assert_eq!(result.status_code, 200);
    assert!(result.content_type.starts_with("text/html"));
    assert_eq!(result.body, html);
    assert_eq!(result.size_bytes, html.len());
    assert_eq!(result.encoding, "UTF-8");
}

#[tokio::test]
async fn test_fetch_sends_configured_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "OnpageSeoTest/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await;
    assert!(result.is_ok(), "Expected headers to match: {:?}", result.err());
}

#[tokio::test]
async fn test_fetch_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await;

    match result {
        Err(FetchError::Http { status_code, .. }) => assert_eq!(status_code, 404),
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await;
    assert!(matches!(
        result,
        Err(FetchError::Http {
            status_code: 503,
            ..
        })
    ));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>too late</p>")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        timeout_ms: 1,
        ..test_fetcher_config()
    };
    let url = format!("{}/slow", mock_server.uri());
    let result = fetcher(&config).fetch(&url).await;

    assert!(
        matches!(result, Err(FetchError::Timeout { .. })),
        "Expected timeout, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Nothing listens on port 1
    let result = fetcher(&test_fetcher_config())
        .fetch("http://127.0.0.1:1/")
        .await;
    assert!(matches!(result, Err(FetchError::Network { .. })));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/new", "<title>Moved</title>").await;

    let url = format!("{}/old", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await.unwrap();

    assert_eq!(result.url, url);
    assert_eq!(result.final_url, format!("{}/new", mock_server.uri()));
    assert_eq!(result.status_code, 200);
    assert_eq!(result.body, "<title>Moved</title>");
}

#[tokio::test]
async fn test_fetch_redirect_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        max_redirects: 2,
        ..test_fetcher_config()
    };
    let url = format!("{}/loop", mock_server.uri());
    let result = fetcher(&config).fetch(&url).await;

    match result {
        Err(FetchError::Network { message, .. }) => assert_eq!(message, "Too many redirects"),
        other => panic!("Expected redirect failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_decodes_declared_charset() {
    let mock_server = MockServer::start().await;

    // "Café" in Latin-1
    let body: Vec<u8> = b"<title>Caf\xe9</title>".to_vec();
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.clone(), "text/html; charset=ISO-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/latin1", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await.unwrap();

    assert_eq!(result.body, "<title>Café</title>");
    assert_eq!(result.encoding, "windows-1252");
    assert_eq!(result.size_bytes, body.len());
}

#[tokio::test]
async fn test_fetch_decodes_meta_charset() {
    let mock_server = MockServer::start().await;

    let body: Vec<u8> = b"<meta charset=\"windows-1252\"><p>na\xefve</p>".to_vec();
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/meta", mock_server.uri());
    let result = fetcher(&test_fetcher_config()).fetch(&url).await.unwrap();

    assert!(result.body.contains("naïve"));
    assert_eq!(result.encoding, "windows-1252");
}
