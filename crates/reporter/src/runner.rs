// Report runner: fetch → summarize → parse → plan → apply.
//
// Round trips happen strictly in order. On any failure the remaining
// phases are aborted; an already-applied skeleton batch is left in
// place (documented partial-failure outcome) rather than rolled
// back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use relatum_common::plan::sequential::plan_bullet_append;
use relatum_common::plan::table::{plan_cell_fill, plan_table_skeleton};
use relatum_common::report::{ReportContent, ReportSections};
use relatum_common::summary::tags::parse_summary;

use crate::commits::CommitFeed;
use crate::config::Config;
use crate::docs::DocumentClient;
use crate::gdocs::GoogleDocsClient;
use crate::period::ReportPeriod;
use crate::summarize::Summarizer;

/// Append strategy for the report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Bullet,
    Table,
}

/// What a completed run did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    pub commit_count: usize,
    pub format: ReportFormat,
    pub operations_applied: usize,
    pub period_from: String,
    pub period_to: String,
}

/// Outcome of a `report` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Written(RunReport),
    NoCommits { period_from: String, period_to: String },
}

/// Parsed sections without a document write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewReport {
    pub commit_count: usize,
    pub period_from: String,
    pub period_to: String,
    pub sections: ReportSections,
}

/// Outcome of a `preview` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PreviewOutcome {
    Summarized(PreviewReport),
    NoCommits { period_from: String, period_to: String },
}

/// Run the full pipeline and append to the configured document.
pub async fn run_report(
    config: &Config,
    period: &ReportPeriod,
    format: ReportFormat,
) -> Result<RunOutcome> {
    let labels = period.labels();

    let feed = CommitFeed::new(config.bitbucket.clone())?;
    let commits =
        feed.fetch_window(period).await.context("failed to fetch commit window")?;
    if commits.is_empty() {
        return Ok(RunOutcome::NoCommits { period_from: labels.from, period_to: labels.to });
    }

    let summarizer = Summarizer::new(config.gemini.clone())?;
    let tagged_text =
        summarizer.summarize(&commits).await.context("failed to generate summary")?;
    let content = content_from_summary(&tagged_text, period);

    let docs = GoogleDocsClient::new(config.google_docs.clone())?;
    let operations_applied = append_report(&docs, &content, format).await?;
    info!(format = ?format, operations = operations_applied, "report appended");

    Ok(RunOutcome::Written(RunReport {
        commit_count: commits.len(),
        format,
        operations_applied,
        period_from: labels.from,
        period_to: labels.to,
    }))
}

/// Fetch and summarize without touching the document.
pub async fn run_preview(config: &Config, period: &ReportPeriod) -> Result<PreviewOutcome> {
    let labels = period.labels();

    let feed = CommitFeed::new(config.bitbucket.clone())?;
    let commits =
        feed.fetch_window(period).await.context("failed to fetch commit window")?;
    if commits.is_empty() {
        return Ok(PreviewOutcome::NoCommits { period_from: labels.from, period_to: labels.to });
    }

    let summarizer = Summarizer::new(config.gemini.clone())?;
    let tagged_text =
        summarizer.summarize(&commits).await.context("failed to generate summary")?;
    let content = content_from_summary(&tagged_text, period);

    Ok(PreviewOutcome::Summarized(PreviewReport {
        commit_count: commits.len(),
        period_from: labels.from,
        period_to: labels.to,
        sections: content.sections,
    }))
}

/// Parse and normalize the tagged blob into planner-ready content.
pub fn content_from_summary(tagged_text: &str, period: &ReportPeriod) -> ReportContent {
    let summary = parse_summary(tagged_text);
    ReportContent { period: period.labels(), sections: ReportSections::from_summary(&summary) }
}

/// Append `content` with the chosen strategy; returns the number of
/// operations applied.
pub async fn append_report(
    doc: &dyn DocumentClient,
    content: &ReportContent,
    format: ReportFormat,
) -> Result<usize> {
    match format {
        ReportFormat::Bullet => append_bullet(doc, content).await,
        ReportFormat::Table => append_table(doc, content).await,
    }
}

async fn append_bullet(doc: &dyn DocumentClient, content: &ReportContent) -> Result<usize> {
    let end = doc.end_offset().await.context("failed to read document end offset")?;
    let plan = plan_bullet_append(end, content);
    let count = plan.ops.len();
    doc.submit_batch(plan.ops).await.context("failed to apply report batch")?;
    info!(operations = count, end_cursor = plan.end_cursor, "bullet report applied");
    Ok(count)
}

async fn append_table(doc: &dyn DocumentClient, content: &ReportContent) -> Result<usize> {
    let end = doc.end_offset().await.context("failed to read document end offset")?;
    let skeleton = plan_table_skeleton(end);
    let skeleton_count = skeleton.len();
    doc.submit_batch(skeleton).await.context("failed to apply table skeleton")?;

    // Locators are only meaningful against a snapshot taken after
    // the skeleton batch; fetch them fresh, use them once.
    let cells =
        doc.table_cell_offsets().await.context("failed to read back table layout")?;
    let fill = plan_cell_fill(&cells, content)?;
    let fill_count = fill.len();
    doc.submit_batch(fill).await.context("failed to apply table content")?;

    Ok(skeleton_count + fill_count)
}
