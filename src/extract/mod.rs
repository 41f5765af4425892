//! Extract stage: HTML to page document
//!
//! This module parses raw HTML into a [`PageDocument`]:
//! - Title and meta description
//! - Heading hierarchy in document order
//! - Visible body text
//! - Links, classified as internal or external
//! - Images and their alt text
//! - Canonical URL, meta robots and document language
//! - Publication dates from JSON-LD blocks
//!
//! Parsing is lenient: html5ever repairs broken markup the way browsers do,
//! and anything missing surfaces as an absent or empty field.

mod text;

pub use text::{collapse_whitespace, visible_text};

use crate::url::classify_href;
use crate::ExtractError;
use scraper::{Html, Selector};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// Share of non-text characters above which input is rejected as binary
const MAX_NON_TEXT_RATIO: f64 = 0.3;

/// Structured content extracted from one HTML page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// URL the page was served from
    pub url: String,

    /// Text of the first `<title>`, absent if missing or blank
    pub title: Option<String>,

    /// Content of the first `<meta name="description">`
    pub meta_description: Option<String>,

    /// All h1-h6 headings in document order
    pub headings: Vec<Heading>,

    /// Visible body text with whitespace collapsed
    pub body_text: String,

    /// Every anchor with a non-empty href
    pub links: Vec<Link>,

    /// Every image element
    pub images: Vec<Image>,

    /// `<link rel="canonical">` href
    pub canonical: Option<String>,

    /// Content of `<meta name="robots">`
    pub meta_robots: Option<String>,

    /// `lang` attribute of the root element
    pub lang: Option<String>,

    pub json_ld_dates: JsonLdDates,
}

/// `datePublished` and `dateModified` as declared in JSON-LD, verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLdDates {
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
}

/// A heading and its level (1-6)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// An anchor element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// The href attribute as written, trimmed
    pub href: String,

    /// The href resolved against the page URL
    pub url: Option<String>,

    /// Anchor text, may be empty
    pub text: String,

    pub is_internal: bool,
}

/// An image element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: Option<String>,

    /// Trimmed alt text
    ///
    /// None when the attribute is missing. An empty or whitespace-only
    /// attribute is `Some("")`.
    pub alt: Option<String>,
}

/// Parses HTML into a page document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - URL the content was served from, used to classify links
///
/// # Returns
///
/// * `Ok(PageDocument)` - Best-effort document, even for broken markup
/// * `Err(ExtractError::MalformedInput)` - The input is binary rather than text
///
/// # Example
///
/// ```
/// use onpage_seo::extract::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>  Hello World  </title></head><body><a href="/about">About</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let document = extract(html, &page_url).unwrap();
/// assert_eq!(document.title.as_deref(), Some("Hello World"));
/// assert!(document.links[0].is_internal);
/// ```
pub fn extract(html: &str, page_url: &Url) -> Result<PageDocument, ExtractError> {
    check_markup(html)?;

    let document = Html::parse_document(html);

    let page = PageDocument {
        url: page_url.to_string(),
        title: extract_title(&document),
        meta_description: extract_meta(&document, "description"),
        headings: extract_headings(&document),
        body_text: extract_body_text(&document),
        links: extract_links(&document, page_url),
        images: extract_images(&document),
        canonical: extract_canonical(&document),
        meta_robots: extract_meta(&document, "robots"),
        lang: extract_lang(&document),
        json_ld_dates: extract_json_ld_dates(&document),
    };

    tracing::debug!(
        "Extracted {}: {} headings, {} links, {} images, {} chars of text",
        page_url,
        page.headings.len(),
        page.links.len(),
        page.images.len(),
        page.body_text.len()
    );

    Ok(page)
}

/// Rejects input that is mostly control or replacement characters
fn check_markup(html: &str) -> Result<(), ExtractError> {
    let total = html.chars().count();
    if total == 0 {
        return Ok(());
    }

    let non_text = html
        .chars()
        .filter(|&c| c == '\u{fffd}' || (c.is_control() && !c.is_whitespace()))
        .count();

    let ratio = non_text as f64 / total as f64;
    if ratio > MAX_NON_TEXT_RATIO {
        return Err(ExtractError::MalformedInput(format!(
            "{} of {} characters are binary or undecodable",
            non_text, total
        )));
    }

    Ok(())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

/// Returns the content of the first `<meta>` whose name matches, ignoring case
fn extract_meta(document: &Html, name: &str) -> Option<String> {
    let meta_selector = Selector::parse("meta[name][content]").ok()?;

    document
        .select(&meta_selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
        .and_then(|element| element.value().attr("content"))
        .map(collapse_whitespace)
}

/// Extracts headings in document order
fn extract_headings(document: &Html) -> Vec<Heading> {
    let Ok(heading_selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };

    document
        .select(&heading_selector)
        .filter_map(|element| {
            let level = element.value().name().strip_prefix('h')?.parse().ok()?;
            Some(Heading::new(level, visible_text(element)))
        })
        .collect()
}

/// Extracts visible text from the body
fn extract_body_text(document: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());

    match body {
        Some(body) => visible_text(body),
        None => visible_text(document.root_element()),
    }
}

/// Extracts every anchor with a non-empty href
fn extract_links(document: &Html, page_url: &Url) -> Vec<Link> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href").map(str::trim) else {
                continue;
            };
            if href.is_empty() {
                continue;
            }

            let target = classify_href(href, page_url);
            links.push(Link {
                href: href.to_string(),
                url: target.resolved,
                text: visible_text(element),
                is_internal: target.is_internal,
            });
        }
    }

    links
}

/// Extracts every image element
fn extract_images(document: &Html) -> Vec<Image> {
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .map(|element| Image {
            src: element
                .value()
                .attr("src")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            alt: element.value().attr("alt").map(|alt| alt.trim().to_string()),
        })
        .collect()
}

/// Extracts the canonical link href
fn extract_canonical(document: &Html) -> Option<String> {
    let canonical_selector = Selector::parse("link[rel][href]").ok()?;

    document
        .select(&canonical_selector)
        .find(|element| {
            element.value().attr("rel").is_some_and(|rel| {
                rel.split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Collects the first `datePublished` and `dateModified` across JSON-LD blocks
///
/// Blocks that fail to parse are skipped. Top-level arrays and `@graph`
/// arrays are searched item by item.
pub fn extract_json_ld_dates(document: &Html) -> JsonLdDates {
    let mut dates = JsonLdDates::default();
    let Ok(script_selector) = Selector::parse("script[type]") else {
        return dates;
    };

    let blocks = document.select(&script_selector).filter(|element| {
        element
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
    });

    for element in blocks {
        let raw: String = element.text().collect();
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Skipping unparseable JSON-LD block: {}", e);
                continue;
            }
        };

        for item in json_ld_items(&value) {
            if dates.date_published.is_none() {
                dates.date_published = date_field(item, "datePublished");
            }
            if dates.date_modified.is_none() {
                dates.date_modified = date_field(item, "dateModified");
            }
        }

        if dates.date_published.is_some() && dates.date_modified.is_some() {
            break;
        }
    }

    dates
}

/// Objects at the top level of a JSON-LD value, then those under `@graph`
fn json_ld_items(value: &Value) -> Vec<&Map<String, Value>> {
    let top: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut items = Vec::new();
    for entry in top {
        if let Some(object) = entry.as_object() {
            items.push(object);
            if let Some(graph) = object.get("@graph").and_then(|g| g.as_array()) {
                items.extend(graph.iter().filter_map(|g| g.as_object()));
            }
        }
    }
    items
}

fn date_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Extracts the document language from the root element
fn extract_lang(document: &Html) -> Option<String> {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}
