//! Overall on-page score and warnings
//!
//! Each check that passes adds its weight; the total is capped at 100.

use crate::analyze::readability::{round_to, words};
use crate::analyze::Report;
use crate::config::AnalyzerConfig;
use crate::extract::PageDocument;
use std::collections::BTreeSet;

const TITLE_CHARS_WEIGHT: u32 = 10;
const TITLE_PX_WEIGHT: u32 = 6;
const META_CHARS_WEIGHT: u32 = 8;
const META_PX_WEIGHT: u32 = 4;
const MIN_WORDS_WEIGHT: u32 = 12;
const INTERNAL_LINKS_WEIGHT: u32 = 10;
const CANONICAL_WEIGHT: u32 = 5;
const ROBOTS_WEIGHT: u32 = 3;
const LANG_WEIGHT: u32 = 3;
const READABILITY_WEIGHT: u32 = 6;
const SENTENCE_LENGTH_WEIGHT: u32 = 5;
const H1_SIMILARITY_WEIGHT: u32 = 4;
const H2_COUNT_WEIGHT: u32 = 6;
const H3_COUNT_WEIGHT: u32 = 4;

/// Similarity between h1 and title at which they count as aligned
const H1_SIMILARITY_THRESHOLD: f64 = 0.3;
const MIN_H2_COUNT: usize = 3;
const MIN_H3_COUNT: usize = 2;

const MAX_SCORE: u32 = 100;

/// Jaccard similarity of the lowercase word sets of two texts
///
/// Rounded to three decimals; 0 when either text has no words.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<String> = words(a).into_iter().map(str::to_lowercase).collect();
    let set_b: BTreeSet<String> = words(b).into_iter().map(str::to_lowercase).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let shared = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    round_to(shared as f64 / union as f64, 3)
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Computes the overall score for an otherwise complete report
pub(crate) fn seo_score(report: &Report, doc: &PageDocument, config: &AnalyzerConfig) -> u32 {
    let readability = &config.readability;
    let level_count = |level: u8| doc.headings.iter().filter(|h| h.level == level).count();

    let checks = [
        (
            config.title_chars.contains(saturating_u32(report.title_length)),
            TITLE_CHARS_WEIGHT,
        ),
        (
            config.title_px.contains(report.title_pixel_width),
            TITLE_PX_WEIGHT,
        ),
        (
            config.meta_chars.contains(saturating_u32(report.meta_length)),
            META_CHARS_WEIGHT,
        ),
        (
            config.meta_px.contains(report.meta_pixel_width),
            META_PX_WEIGHT,
        ),
        (
            report.readability.word_count >= config.min_words,
            MIN_WORDS_WEIGHT,
        ),
        (
            report.link_stats.internal_count >= config.min_internal_links,
            INTERNAL_LINKS_WEIGHT,
        ),
        (report.technical.canonical_present, CANONICAL_WEIGHT),
        (report.technical.robots_present, ROBOTS_WEIGHT),
        (report.technical.lang_present, LANG_WEIGHT),
        (
            report.readability_score >= readability.easy_threshold,
            READABILITY_WEIGHT,
        ),
        (
            report.readability.average_sentence_length <= readability.max_average_sentence_length,
            SENTENCE_LENGTH_WEIGHT,
        ),
        (
            report.h1_title_similarity >= H1_SIMILARITY_THRESHOLD,
            H1_SIMILARITY_WEIGHT,
        ),
        (level_count(2) >= MIN_H2_COUNT, H2_COUNT_WEIGHT),
        (level_count(3) >= MIN_H3_COUNT, H3_COUNT_WEIGHT),
    ];

    let total: u32 = checks
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, weight)| weight)
        .sum();
    total.min(MAX_SCORE)
}

/// Collects human-readable warnings for the report
pub(crate) fn warnings(report: &Report, config: &AnalyzerConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if report.link_stats.total == 0 {
        warnings.push("no links detected".to_string());
    }

    if report.link_stats.internal_count < config.min_internal_links {
        warnings.push(format!(
            "few internal links: {} (< {})",
            report.link_stats.internal_count, config.min_internal_links
        ));
    }

    warnings
}
