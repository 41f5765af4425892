//! Fetch stage: page retrieval
//!
//! This module contains the first pipeline stage:
//! - The [`FetchResult`] handed to the extractor
//! - The [`PageSource`] trait the pipeline fetches through
//! - [`HttpFetcher`], the reqwest-backed page source
//! - Charset detection for response bodies

mod charset;
mod client;

pub use charset::{charset_from_content_type, decode_body};
pub use client::{build_http_client, fetch_url};

use crate::config::FetcherConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// Raw page content plus transport metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Decoded page body
    pub body: String,

    /// Time from request start to body fully read
    pub duration_ms: u64,

    /// Size of the raw body in bytes
    pub size_bytes: usize,

    /// Name of the encoding the body was decoded with
    pub encoding: String,
}

/// Anything the pipeline can retrieve a page from
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieves the page at `url`
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}

/// Page source backed by a reqwest HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the fetcher configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        fetch_url(&self.client, url).await
    }
}
