//! SERP snippet width estimation

use crate::config::{CharWidths, Range};
use serde::Serialize;
use std::collections::BTreeSet;

/// Problems with the length of a title or meta description
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LengthIssue {
    /// Absent or empty
    Missing,
    /// Narrower than the configured minimum
    TooShort,
    /// Wider than the configured maximum, likely truncated in results
    TooLong,
}

/// Estimates the rendered width of `text` in pixels
///
/// Sums the per-class widths of every character and truncates to whole pixels.
///
/// # Examples
///
/// ```
/// use onpage_seo::analyze::pixel_width;
/// use onpage_seo::config::CharWidths;
///
/// // 9.5 + 7.5 + 3.0 + 7.5
/// assert_eq!(pixel_width("Ab 1", &CharWidths::default()), 27);
/// ```
pub fn pixel_width(text: &str, widths: &CharWidths) -> u32 {
    let total: f64 = text.chars().map(|c| char_width(c, widths)).sum();
    total.floor() as u32
}

fn char_width(c: char, widths: &CharWidths) -> f64 {
    if c.is_ascii_uppercase() {
        widths.uppercase
    } else if c.is_ascii_lowercase() {
        widths.lowercase
    } else if c.is_ascii_digit() {
        widths.digit
    } else if c.is_whitespace() {
        widths.whitespace
    } else {
        widths.other
    }
}

/// Checks a title or meta description against its pixel range
///
/// `Missing` is reported alone; otherwise at most one of `TooShort` and
/// `TooLong` applies.
pub fn length_issues(text: Option<&str>, width: u32, range: &Range) -> BTreeSet<LengthIssue> {
    let mut issues = BTreeSet::new();

    match text.map(str::trim) {
        None | Some("") => {
            issues.insert(LengthIssue::Missing);
        }
        Some(_) => {
            if width < range.min {
                issues.insert(LengthIssue::TooShort);
            } else if width > range.max {
                issues.insert(LengthIssue::TooLong);
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths() -> CharWidths {
        CharWidths::default()
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        assert_eq!(pixel_width("", &widths()), 0);
    }

    #[test]
    fn test_character_classes() {
        assert_eq!(pixel_width("AAAA", &widths()), 38);
        assert_eq!(pixel_width("aaaa", &widths()), 30);
        assert_eq!(pixel_width("1234", &widths()), 30);
        assert_eq!(pixel_width("    ", &widths()), 12);
        assert_eq!(pixel_width("!?é€", &widths()), 32);
    }

    #[test]
    fn test_width_is_truncated() {
        // 9.5 + 3.0 = 12.5
        assert_eq!(pixel_width("A ", &widths()), 12);
    }

    #[test]
    fn test_custom_widths() {
        let custom = CharWidths {
            lowercase: 10.0,
            ..CharWidths::default()
        };
        assert_eq!(pixel_width("abc", &custom), 30);
    }

    #[test]
    fn test_missing() {
        let range = Range::new(200, 600);
        assert_eq!(
            length_issues(None, 0, &range),
            BTreeSet::from([LengthIssue::Missing])
        );
        assert_eq!(
            length_issues(Some("  "), 0, &range),
            BTreeSet::from([LengthIssue::Missing])
        );
    }

    #[test]
    fn test_too_short_and_too_long() {
        let range = Range::new(200, 600);
        assert_eq!(
            length_issues(Some("Hi"), 199, &range),
            BTreeSet::from([LengthIssue::TooShort])
        );
        assert_eq!(
            length_issues(Some("Long"), 601, &range),
            BTreeSet::from([LengthIssue::TooLong])
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = Range::new(200, 600);
        assert!(length_issues(Some("x"), 200, &range).is_empty());
        assert!(length_issues(Some("x"), 600, &range).is_empty());
    }
}
