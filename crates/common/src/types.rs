// Core domain types shared across all Relatum crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated record from the commit feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub date: NaiveDate,
    pub message: String,
    /// Web link to the commit.
    pub url: String,
}

/// The three tag-delimited buckets extracted from a generated summary.
///
/// Slots hold raw block text. An absent tag leaves its slot empty,
/// which is a valid "no items in this bucket" state, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedSummary {
    pub completed: String,
    pub in_progress: String,
    pub new: String,
}

/// Ordered, normalized report lines for one status bucket.
///
/// Lines are non-empty and trimmed; source order and duplicates are
/// preserved. An empty block is distinct from a block holding one
/// empty string; the latter cannot be produced by the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineBlock(Vec<String>);

impl LineBlock {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self(lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Newline-joined body text; empty string for an empty block.
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

/// Pre-formatted report period labels, used verbatim in report text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodLabels {
    pub from: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_is_distinct_from_block_of_empty_string() {
        let empty = LineBlock::default();
        let one_blank = LineBlock::from_lines(vec![String::new()]);
        assert_ne!(empty, one_blank);
        assert!(empty.is_empty());
        assert_eq!(one_blank.len(), 1);
    }

    #[test]
    fn joined_preserves_order_and_duplicates() {
        let block =
            LineBlock::from_lines(vec!["fix cache".into(), "fix cache".into(), "docs".into()]);
        assert_eq!(block.joined(), "fix cache\nfix cache\ndocs");
    }

    #[test]
    fn commit_record_roundtrips_through_json() {
        let record = CommitRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            message: "fix login bug".into(),
            url: "https://bitbucket.org/acme/app/commits/abc123".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: CommitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
