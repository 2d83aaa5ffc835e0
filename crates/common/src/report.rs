// Report content assembly: heading, section titles, bucket decoration.

use serde::{Deserialize, Serialize};

use crate::summary::lines::normalize_lines;
use crate::types::{LineBlock, PeriodLabels, TaggedSummary};

/// Heading inserted above every appended report, newline included.
pub const REPORT_HEADING: &str = "Weekly Status Report\n";

/// Status bucket identity, in fixed report order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Completed,
    InProgress,
    New,
}

impl Bucket {
    /// Section title line for this bucket (no trailing newline).
    pub fn title(self) -> &'static str {
        match self {
            Bucket::Completed => "1. Tasks completed 100%:",
            Bucket::InProgress => "2. Tasks continue to work on:",
            Bucket::New => "3. New tasks started:",
        }
    }

    /// Glyph prefixed to each line in the table format.
    pub fn glyph(self) -> &'static str {
        match self {
            Bucket::Completed => "✅",
            Bucket::InProgress => "⏳",
            Bucket::New => "🆕",
        }
    }
}

/// Normalized line blocks for the three buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSections {
    pub completed: LineBlock,
    pub in_progress: LineBlock,
    pub new: LineBlock,
}

impl ReportSections {
    /// Normalize each slot of a parsed summary.
    pub fn from_summary(summary: &TaggedSummary) -> Self {
        Self {
            completed: normalize_lines(&summary.completed),
            in_progress: normalize_lines(&summary.in_progress),
            new: normalize_lines(&summary.new),
        }
    }

    /// Sections in fixed report order: completed, in progress, new.
    pub fn ordered(&self) -> [(Bucket, &LineBlock); 3] {
        [
            (Bucket::Completed, &self.completed),
            (Bucket::InProgress, &self.in_progress),
            (Bucket::New, &self.new),
        ]
    }

    pub fn all_empty(&self) -> bool {
        self.ordered().iter().all(|(_, block)| block.is_empty())
    }
}

/// Everything the planners need to append one report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportContent {
    pub period: PeriodLabels,
    pub sections: ReportSections,
}

impl ReportContent {
    /// The four single-column cell strings for the table format, in
    /// row order: period header, then one cell per section.
    pub fn table_cells(&self) -> [String; 4] {
        let header = format!("Period from {} to {}", self.period.from, self.period.to);
        let [first, second, third] = self
            .sections
            .ordered()
            .map(|(bucket, block)| format!("{}\n{}", bucket.title(), decorated_lines(bucket, block)));
        [header, first, second, third]
    }
}

fn decorated_lines(bucket: Bucket, block: &LineBlock) -> String {
    block
        .lines()
        .iter()
        .map(|line| format!("{} {line}", bucket.glyph()))
        .collect::<Vec<_>>()
        .join("\n")
}
