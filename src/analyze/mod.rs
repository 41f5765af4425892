//! Analyze stage: page document to scored report
//!
//! The analyzer is a pure function of its inputs. It never fails: missing
//! data degrades to zero, empty, or absent values in the [`Report`], and the
//! same document and keyword always produce the same report.

mod headings;
mod keywords;
mod pixels;
mod readability;
mod score;

pub use headings::{heading_issues, HeadingIssue};
pub use keywords::{keyword_stats, KeywordStats};
pub use pixels::{length_issues, pixel_width, LengthIssue};
pub use readability::{flesch_reading_ease, sentences, syllables, words, ReadabilityStats};
pub use score::jaccard_similarity;

use crate::config::AnalyzerConfig;
use crate::extract::{Heading, JsonLdDates, PageDocument};
use readability::round_to;
use serde::Serialize;
use std::collections::BTreeSet;

/// On-page SEO report for one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Estimated rendered width of the title
    pub title_pixel_width: u32,

    /// Title length in characters
    pub title_length: usize,

    pub title_issues: BTreeSet<LengthIssue>,

    /// Estimated rendered width of the meta description
    pub meta_pixel_width: u32,

    /// Meta description length in characters
    pub meta_length: usize,

    pub meta_issues: BTreeSet<LengthIssue>,

    /// Flesch reading ease of the body text, 0-100
    pub readability_score: f64,

    pub readability: ReadabilityStats,

    /// Headings exactly as they appear in the document
    pub heading_outline: Vec<Heading>,

    pub heading_issues: BTreeSet<HeadingIssue>,

    /// h2 and h3 headings per 1000 body words
    pub heading_density_per_1000_words: f64,

    /// Body words per h2; the full word count when there is no h2
    pub words_per_h2_avg: f64,

    /// Word-set similarity between the first h1 and the title
    pub h1_title_similarity: f64,

    pub link_stats: LinkStats,

    pub image_stats: ImageStats,

    /// Present only when a non-empty focus keyword was given
    pub keyword_stats: Option<KeywordStats>,

    pub technical: TechnicalStats,

    pub json_ld_dates: JsonLdDates,

    /// Weighted on-page score, 0-100
    pub score: u32,

    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: usize,
    pub internal_count: usize,
    pub external_count: usize,
    /// Links whose anchor text is empty
    pub no_text_count: usize,
    /// Shares of `total`, three decimals; 0 without links
    pub internal_ratio: f64,
    pub external_ratio: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: usize,
    /// Images without an alt attribute; `alt=""` does not count
    pub missing_alt_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalStats {
    pub canonical_present: bool,
    pub robots_present: bool,
    pub lang_present: bool,
}

/// Analyzes a page document
///
/// # Arguments
///
/// * `doc` - The extracted page document
/// * `keyword` - Optional focus keyword; ignored when blank
/// * `config` - Thresholds, width table and readability constants
///
/// # Example
///
/// ```
/// use onpage_seo::analyze::{analyze, LengthIssue};
/// use onpage_seo::config::AnalyzerConfig;
/// use onpage_seo::extract::PageDocument;
///
/// let doc = PageDocument {
///     body_text: "cat dog cat".to_string(),
///     ..PageDocument::default()
/// };
/// let report = analyze(&doc, Some("cat"), &AnalyzerConfig::default());
///
/// assert!(report.title_issues.contains(&LengthIssue::Missing));
/// assert_eq!(report.keyword_stats.unwrap().count, 2);
/// ```
pub fn analyze(doc: &PageDocument, keyword: Option<&str>, config: &AnalyzerConfig) -> Report {
    let title = doc.title.as_deref().unwrap_or("").trim();
    let meta = doc.meta_description.as_deref().unwrap_or("").trim();

    let title_pixel_width = pixel_width(title, &config.char_widths);
    let meta_pixel_width = pixel_width(meta, &config.char_widths);

    let (readability_score, readability) =
        flesch_reading_ease(&doc.body_text, &config.readability);

    let first_h1 = doc
        .headings
        .iter()
        .find(|h| h.level == 1)
        .map(|h| h.text.as_str())
        .unwrap_or("");

    let mut report = Report {
        title_pixel_width,
        title_length: title.chars().count(),
        title_issues: length_issues(Some(title), title_pixel_width, &config.title_px),
        meta_pixel_width,
        meta_length: meta.chars().count(),
        meta_issues: length_issues(Some(meta), meta_pixel_width, &config.meta_px),
        readability_score,
        readability,
        heading_outline: doc.headings.clone(),
        heading_issues: heading_issues(&doc.headings),
        heading_density_per_1000_words: heading_density(doc, readability.word_count),
        words_per_h2_avg: words_per_h2(doc, readability.word_count),
        h1_title_similarity: jaccard_similarity(first_h1, title),
        link_stats: link_stats(doc),
        image_stats: image_stats(doc),
        keyword_stats: keyword.and_then(|k| keyword_stats(doc, k)),
        technical: TechnicalStats {
            canonical_present: doc.canonical.is_some(),
            robots_present: doc.meta_robots.as_deref().is_some_and(|r| !r.is_empty()),
            lang_present: doc.lang.is_some(),
        },
        json_ld_dates: doc.json_ld_dates.clone(),
        score: 0,
        warnings: Vec::new(),
    };

    report.score = score::seo_score(&report, doc, config);
    report.warnings = score::warnings(&report, config);

    tracing::debug!(
        "Analyzed document: score {}, readability {}, {} words",
        report.score,
        report.readability_score,
        report.readability.word_count
    );

    report
}

fn link_stats(doc: &PageDocument) -> LinkStats {
    let total = doc.links.len();
    let internal_count = doc.links.iter().filter(|l| l.is_internal).count();
    let external_count = total - internal_count;
    let ratio = |count: usize| {
        if total == 0 {
            0.0
        } else {
            round_to(count as f64 / total as f64, 3)
        }
    };

    LinkStats {
        total,
        internal_count,
        external_count,
        internal_ratio: ratio(internal_count),
        external_ratio: ratio(external_count),
        no_text_count: doc
            .links
            .iter()
            .filter(|l| l.text.trim().is_empty())
            .count(),
    }
}

fn level_count(doc: &PageDocument, level: u8) -> usize {
    doc.headings.iter().filter(|h| h.level == level).count()
}

fn heading_density(doc: &PageDocument, word_count: usize) -> f64 {
    let headings = level_count(doc, 2) + level_count(doc, 3);
    round_to(headings as f64 / word_count.max(1) as f64 * 1000.0, 2)
}

fn words_per_h2(doc: &PageDocument, word_count: usize) -> f64 {
    match level_count(doc, 2) {
        0 => word_count as f64,
        h2 => round_to(word_count as f64 / h2 as f64, 1),
    }
}

fn image_stats(doc: &PageDocument) -> ImageStats {
    ImageStats {
        total: doc.images.len(),
        missing_alt_count: doc.images.iter().filter(|i| i.alt.is_none()).count(),
    }
}
