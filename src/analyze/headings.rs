use crate::extract::Heading;
use serde::Serialize;
use std::collections::BTreeSet;

/// Structural problems in the heading outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadingIssue {
    /// A heading is more than one level deeper than the one before it
    SkippedLevel,
    /// No level-1 heading on the page
    MissingH1,
}

/// Checks a heading sequence, in document order, for outline problems
///
/// Moving back up any number of levels (h4 to h2) is fine; only descending
/// by more than one level at a time counts as a skip.
pub fn heading_issues(headings: &[Heading]) -> BTreeSet<HeadingIssue> {
    let mut issues = BTreeSet::new();

    if headings
        .windows(2)
        .any(|pair| pair[1].level > pair[0].level + 1)
    {
        issues.insert(HeadingIssue::SkippedLevel);
    }

    if !headings.iter().any(|h| h.level == 1) {
        issues.insert(HeadingIssue::MissingH1);
    }

    issues
}
