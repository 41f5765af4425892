//! Pipeline orchestration
//!
//! Runs fetch, extract and analyze in sequence for a single URL. The first
//! failing stage ends the run; no partial report is produced.

mod response;

pub use response::{ErrorBody, ErrorResponse};

use crate::analyze::{analyze, Report};
use crate::config::{AnalyzerConfig, Config};
use crate::extract::extract;
use crate::fetch::{HttpFetcher, PageSource};
use crate::url::parse_page_url;
use crate::{FetchError, PipelineError};
use serde::Serialize;
use std::fmt;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Extract,
    Analyze,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Analyze => "analyze",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch, extract and analyze over a page source
pub struct Pipeline<S> {
    source: S,
    config: AnalyzerConfig,
}

impl<S: PageSource> Pipeline<S> {
    /// Creates a pipeline reading pages from `source`
    pub fn new(source: S, config: AnalyzerConfig) -> Self {
        Self { source, config }
    }

    /// Analyzes the page at `url`
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute HTTP(S) URL of the page
    /// * `keyword` - Optional focus keyword
    ///
    /// # Returns
    ///
    /// * `Ok(Report)` - The complete report
    /// * `Err(PipelineError)` - The first stage failure
    pub async fn analyze_page(
        &self,
        url: &str,
        keyword: Option<&str>,
    ) -> Result<Report, PipelineError> {
        tracing::info!("[{}] {}", Stage::Fetch, url);
        let fetched = self.source.fetch(url).await.map_err(|e| {
            tracing::warn!("[{}] {}", Stage::Fetch, e);
            e
        })?;

        if fetched.final_url != fetched.url {
            tracing::info!("Redirected to {}", fetched.final_url);
        }

        // Links are classified against where the page was actually served from
        let page_url = parse_page_url(&fetched.final_url)
            .or_else(|_| parse_page_url(url))
            .map_err(|source| FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            })?;

        tracing::info!(
            "[{}] {} bytes ({})",
            Stage::Extract,
            fetched.size_bytes,
            fetched.encoding
        );
        let document = extract(&fetched.body, &page_url).map_err(|e| {
            tracing::warn!("[{}] {}", Stage::Extract, e);
            e
        })?;

        tracing::info!("[{}] keyword: {:?}", Stage::Analyze, keyword);
        let report = analyze(&document, keyword, &self.config);

        tracing::info!(
            "Analysis of {} complete (score {})",
            fetched.final_url,
            report.score
        );
        Ok(report)
    }
}

/// Analyzes the page at `url` over HTTP
///
/// This is the main entry point. It builds an [`HttpFetcher`] from
/// `config.fetcher` and runs a [`Pipeline`] with `config.analyzer`.
///
/// # Example
///
/// ```no_run
/// use onpage_seo::{analyze_page, Config};
///
/// # async fn example() {
/// let config = Config::default();
/// match analyze_page(&config, "https://example.com/", Some("example")).await {
///     Ok(report) => println!("Score: {}", report.score),
///     Err(e) => println!("{} failed: {}", e.stage(), e),
/// }
/// # }
/// ```
pub async fn analyze_page(
    config: &Config,
    url: &str,
    keyword: Option<&str>,
) -> Result<Report, PipelineError> {
    let fetcher = HttpFetcher::new(&config.fetcher).map_err(|e| FetchError::Network {
        url: url.to_string(),
        message: format!("Failed to build HTTP client: {}", e),
    })?;

    Pipeline::new(fetcher, config.analyzer.clone())
        .analyze_page(url, keyword)
        .await
}
