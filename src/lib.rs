//! Onpage-SEO: single-page on-page SEO analysis
//!
//! This crate fetches one web page, extracts its structure (title, meta
//! description, headings, body text, links, images) and scores it: pixel
//! widths for SERP snippets, readability, link and image inventory, and
//! focus keyword usage.
//!
//! The work is a three-stage pipeline:
//!
//! 1. [`fetch`] retrieves the raw HTML
//! 2. [`extract`] turns it into a [`PageDocument`]
//! 3. [`analyze`] scores the document into a [`Report`]
//!
//! [`pipeline`] sequences the stages and tags failures with the stage that
//! produced them.

pub mod analyze;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Errors raised while retrieving a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl { url: String, source: UrlError },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status_code} returned by {url}")]
    Http { url: String, status_code: u16 },
}

/// Errors raised while extracting a page document from markup
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Input is not parseable as markup: {0}")]
    MalformedInput(String),
}

/// A pipeline failure, tagged with the stage that produced it
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch stage failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extract stage failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyze::{analyze, Report};
pub use config::Config;
pub use extract::{extract, PageDocument};
pub use fetch::{FetchResult, HttpFetcher, PageSource};
pub use pipeline::{analyze_page, ErrorResponse, Pipeline, Stage};
