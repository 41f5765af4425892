//! URL handling module for Onpage-SEO
//!
//! This module validates page URLs, extracts hosts, and classifies link
//! targets as internal or external relative to the analyzed page.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, host_key, same_host};

/// Parses a page URL, accepting only absolute HTTP(S) URLs with a host
///
/// # Examples
///
/// ```
/// use onpage_seo::url::parse_page_url;
///
/// assert!(parse_page_url("https://example.com/page").is_ok());
/// assert!(parse_page_url("/relative/path").is_err());
/// assert!(parse_page_url("ftp://example.com/").is_err());
/// ```
pub fn parse_page_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}

/// Where a link points, relative to the page it appears on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// The href resolved against the page URL, if resolvable
    pub resolved: Option<String>,
    /// True if the href is relative or its host matches the page host
    pub is_internal: bool,
}

/// Classifies an href found on `page_url`
///
/// A relative href (including fragment-only and query-only references) is
/// internal. A protocol-relative or absolute href is internal only when its
/// host matches the page host; hrefs without a host (`mailto:`,
/// `javascript:`, `tel:`) are external.
///
/// # Examples
///
/// ```
/// use onpage_seo::url::classify_href;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/blog/").unwrap();
///
/// let target = classify_href("post-1", &page);
/// assert!(target.is_internal);
/// assert_eq!(target.resolved.as_deref(), Some("https://example.com/blog/post-1"));
///
/// assert!(!classify_href("https://other.com/", &page).is_internal);
/// ```
pub fn classify_href(href: &str, page_url: &Url) -> LinkTarget {
    let href = href.trim();

    match Url::parse(href) {
        Ok(absolute) => LinkTarget {
            is_internal: same_host(&absolute, page_url),
            resolved: Some(absolute.to_string()),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let resolved = page_url.join(href).ok();
            // Protocol-relative hrefs name their own host
            let is_internal = if href.starts_with("//") {
                resolved
                    .as_ref()
                    .is_some_and(|target| same_host(target, page_url))
            } else {
                true
            };
            LinkTarget {
                resolved: resolved.map(|u| u.to_string()),
                is_internal,
            }
        }
        Err(_) => LinkTarget {
            resolved: None,
            is_internal: false,
        },
    }
}
