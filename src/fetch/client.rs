//! HTTP fetcher implementation
//!
//! This module handles the single HTTP request made per analysis:
//! - Building the HTTP client from the fetcher configuration
//! - Validating the requested URL
//! - A GET request with redirects followed
//! - Error classification into timeout, network and HTTP status failures
//! - Decoding the body with the declared or detected charset

use crate::config::FetcherConfig;
use crate::fetch::charset::{charset_from_content_type, decode_body};
use crate::fetch::FetchResult;
use crate::url::parse_page_url;
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use onpage_seo::config::FetcherConfig;
/// use onpage_seo::fetch::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    match HeaderValue::from_str(&config.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(_) => tracing::warn!(
            "Ignoring invalid accept-language value: {:?}",
            config.accept_language
        ),
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, without retries
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Not an absolute HTTP(S) URL | `InvalidUrl` |
/// | Timeout (connect, send or body) | `Timeout` |
/// | Connection refused, DNS, TLS, redirect limit | `Network` |
/// | HTTP status >= 400 | `Http` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchResult, FetchError> {
    let page_url = parse_page_url(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let started = Instant::now();
    tracing::debug!("GET {}", page_url);

    let response = client
        .get(page_url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, &e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if status.as_u16() >= 400 {
        tracing::warn!("{} returned HTTP {}", final_url, status.as_u16());
        return Err(FetchError::Http {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, &e))?;

    let declared = charset_from_content_type(&content_type);
    let (body, encoding) = decode_body(&bytes, declared.as_deref());
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(
        "Fetched {} ({} bytes, {}, {}ms)",
        final_url,
        bytes.len(),
        encoding,
        duration_ms
    );

    Ok(FetchResult {
        url: page_url.to_string(),
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
        duration_ms,
        size_bytes: bytes.len(),
        encoding: encoding.to_string(),
    })
}

/// Maps a transport error to the fetch error taxonomy
fn classify_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection failed".to_string(),
        }
    } else if error.is_redirect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Too many redirects".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
