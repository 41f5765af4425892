//! Readability scoring
//!
//! Uses the Flesch reading ease formula:
//!
//! ```text
//! 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
//! ```
//!
//! The constants come from [`ReadabilityConfig`]. Syllables are estimated by
//! counting vowel groups.

use crate::config::ReadabilityConfig;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Counts behind the readability score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub average_sentence_length: f64,
}

/// `\b[\w'’-]+\b`: word characters plus inner apostrophes and hyphens
fn word_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\b[\w'\x{2019}-]+\b").ok())
        .as_ref()
}

/// Sentence-ending punctuation followed by whitespace
fn sentence_break_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.?!]\s+").ok()).as_ref()
}

fn vowel_group_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[aeiouy]+").ok()).as_ref()
}

/// Splits text into words
///
/// A word is a run of word characters, apostrophes and hyphens that starts
/// and ends with a word character. `don't` and `well-known` are single words.
pub fn words(text: &str) -> Vec<&str> {
    match word_pattern() {
        Some(pattern) => pattern.find_iter(text).map(|m| m.as_str()).collect(),
        None => Vec::new(),
    }
}

/// Splits text into sentences after `.`, `?` or `!` followed by whitespace
pub fn sentences(text: &str) -> Vec<&str> {
    let Some(pattern) = sentence_break_pattern() else {
        let trimmed = text.trim();
        return if trimmed.is_empty() { Vec::new() } else { vec![trimmed] };
    };

    let mut result = Vec::new();
    let mut start = 0;
    for m in pattern.find_iter(text) {
        // The punctuation mark is one byte and stays with its sentence
        let end = m.start() + 1;
        result.push(&text[start..end]);
        start = m.end();
    }
    result.push(&text[start..]);

    result
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Estimates the syllables in one word
pub fn syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let groups = vowel_group_pattern().map_or(0, |pattern| pattern.find_iter(&word).count());

    let mut count = groups.max(1);
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count
}

/// Computes the Flesch reading ease of `text`
///
/// # Returns
///
/// The score clamped to 0..=100 and rounded to two decimals (0 for text
/// without words), together with the underlying counts.
pub fn flesch_reading_ease(text: &str, config: &ReadabilityConfig) -> (f64, ReadabilityStats) {
    let words = words(text);
    let sentence_count = sentences(text).len();
    let word_count = words.len();
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    let average_sentence_length = round_to(word_count as f64 / sentence_count.max(1) as f64, 2);

    let stats = ReadabilityStats {
        word_count,
        sentence_count,
        syllable_count,
        average_sentence_length,
    };

    if word_count == 0 || sentence_count == 0 {
        return (0.0, stats);
    }

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;
    let raw = config.base
        - config.sentence_weight * words_per_sentence
        - config.syllable_weight * syllables_per_word;

    (round_to(raw.clamp(0.0, 100.0), 2), stats)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
