//! End-to-end analysis through the HTTP pipeline

use crate::{mount_html, test_config};
use onpage_seo::analyze::{HeadingIssue, LengthIssue};
use onpage_seo::config::FetcherConfig;
use onpage_seo::{analyze_page, Stage};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_page_without_title() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        &format!(
            r#"<html lang="en"><body>
            <h2>Section</h2>
            <p>Short page.</p>
            <a href="/about">About</a>
            <a href="{}/contact">Contact</a>
            <a href="https://elsewhere.org/">Elsewhere</a>
            <img src="/logo.png">
            </body></html>"#,
            base_url
        ),
    )
    .await;

    let report = analyze_page(&test_config(), &format!("{}/", base_url), None)
        .await
        .expect("Analysis should succeed");

    assert!(report.title_issues.contains(&LengthIssue::Missing));
    assert_eq!(report.title_length, 0);
    assert!(report.meta_issues.contains(&LengthIssue::Missing));
    assert!(report.heading_issues.contains(&HeadingIssue::MissingH1));

    assert_eq!(report.link_stats.total, 3);
    assert_eq!(report.link_stats.internal_count, 2);
    assert_eq!(report.link_stats.external_count, 1);
    assert_eq!(report.image_stats.total, 1);
    assert_eq!(report.image_stats.missing_alt_count, 1);

    assert!(report.technical.lang_present);
    assert!(!report.technical.canonical_present);
    assert!(report.keyword_stats.is_none());
}

#[tokio::test]
async fn test_keyword_usage() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/cats",
        r#"<html><head><title>Cat care basics</title>
        <meta name="description" content="Everything about dogs"></head>
        <body><h1>Caring for a cat</h1><p>cat dog cat</p></body></html>"#,
    )
    .await;

    let url = format!("{}/cats", mock_server.uri());
    let report = analyze_page(&test_config(), &url, Some("Cat"))
        .await
        .expect("Analysis should succeed");

    let stats = report.keyword_stats.expect("Keyword stats should be present");
    // "Caring for a cat cat dog cat"
    assert_eq!(stats.count, 3);
    assert_eq!(stats.density, 3.0 / 7.0);
    assert!(stats.in_title);
    assert!(!stats.in_meta);
    assert!(stats.in_first_heading);
}

#[tokio::test]
async fn test_timeout_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>Slow</title>")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = test_config();
    config.fetcher = FetcherConfig {
        timeout_ms: 1,
        ..config.fetcher
    };

    let url = format!("{}/slow", mock_server.uri());
    let error = analyze_page(&config, &url, None)
        .await
        .expect_err("Analysis should time out");

    assert_eq!(error.stage(), Stage::Fetch);
    assert_eq!(error.http_status(), 504);

    let json = serde_json::to_value(error.to_response()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "error": {
                "stage": "fetch",
                "kind": "FetchTimeout",
                "message": format!("Request timeout for {}", url)
            }
        })
    );
}

#[tokio::test]
async fn test_invalid_url_error() {
    let error = analyze_page(&test_config(), "ftp://example.com/file", None)
        .await
        .expect_err("Non-HTTP URL should be rejected");

    assert_eq!(error.stage(), Stage::Fetch);
    assert_eq!(error.kind(), "InvalidUrl");
    assert_eq!(error.http_status(), 400);
}

#[tokio::test]
async fn test_http_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/broken", mock_server.uri());
    let error = analyze_page(&test_config(), &url, None)
        .await
        .expect_err("Server error should fail the fetch stage");

    let response = error.to_response();
    assert_eq!(response.error.stage, Stage::Fetch);
    assert_eq!(response.error.kind, "FetchHttpError");
    assert_eq!(response.error.status_code, Some(500));
}

#[tokio::test]
async fn test_report_serializes_camel_case() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/",
        "<html><head><title>Hello world</title></head><body><h1>Hello</h1></body></html>",
    )
    .await;

    let report = analyze_page(&test_config(), &format!("{}/", mock_server.uri()), None)
        .await
        .expect("Analysis should succeed");
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["titleLength"], 11);
    assert!(json["titlePixelWidth"].is_u64());
    assert!(json["readabilityScore"].is_number());
    assert!(json["headingOutline"].is_array());
    assert!(json["linkStats"]["internalCount"].is_u64());
    assert!(json["keywordStats"].is_null());
}
