//! Focus keyword usage

use crate::analyze::readability::words;
use crate::extract::{collapse_whitespace, PageDocument};
use regex::Regex;
use serde::Serialize;

/// How a focus keyword is used on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStats {
    /// The keyword as evaluated (trimmed, whitespace collapsed)
    pub keyword: String,

    /// Whole-word occurrences in the body text
    pub count: usize,

    /// `count` divided by the body word count
    pub density: f64,

    pub in_title: bool,
    pub in_meta: bool,
    pub in_first_heading: bool,

    /// The keyword appears in the page URL, words separated by any punctuation
    pub in_url: bool,

    /// Number of h2 headings containing the keyword
    pub in_h2_count: usize,

    /// Number of h3 headings containing the keyword
    pub in_h3_count: usize,
}

/// Evaluates a focus keyword against a page document
///
/// Returns None when the keyword is empty after trimming. All matching is
/// case-insensitive; the title, meta and heading checks are substring
/// checks while the body count only counts whole words.
pub fn keyword_stats(doc: &PageDocument, keyword: &str) -> Option<KeywordStats> {
    let keyword = collapse_whitespace(keyword);
    if keyword.is_empty() {
        return None;
    }

    let needle = keyword.to_lowercase();
    let count = count_whole_word(&doc.body_text, &keyword);
    let word_count = words(&doc.body_text).len();
    let density = if word_count == 0 {
        0.0
    } else {
        count as f64 / word_count as f64
    };

    let contains = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(&needle));
    let heading_pattern = whole_word_pattern(&keyword, r"\s+");
    let headings_containing = |level: u8| {
        heading_pattern.as_ref().map_or(0, |pattern| {
            doc.headings
                .iter()
                .filter(|h| h.level == level && pattern.is_match(&h.text))
                .count()
        })
    };

    // Slugs write "cat food" as cat-food or cat_food
    let in_url = whole_word_pattern(&keyword, r"[\W_]+")
        .is_some_and(|pattern| pattern.is_match(&doc.url));

    Some(KeywordStats {
        count,
        density,
        in_title: contains(doc.title.as_deref()),
        in_meta: contains(doc.meta_description.as_deref()),
        in_first_heading: contains(doc.headings.first().map(|h| h.text.as_str())),
        in_url,
        in_h2_count: headings_containing(2),
        in_h3_count: headings_containing(3),
        keyword,
    })
}

/// Builds a case-insensitive `\b...\b` pattern for `keyword`
///
/// The keyword's words are escaped and joined with `separator`.
fn whole_word_pattern(keyword: &str, separator: &str) -> Option<Regex> {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(separator);
    if body.is_empty() {
        return None;
    }

    Regex::new(&format!(r"(?i)\b{}\b", body)).ok()
}

/// Counts whole-word occurrences of `keyword` in `haystack`, ignoring case
fn count_whole_word(haystack: &str, keyword: &str) -> usize {
    whole_word_pattern(keyword, r"\s+").map_or(0, |pattern| pattern.find_iter(haystack).count())
}
