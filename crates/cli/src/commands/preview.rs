// `relatum preview` — fetch and summarize, print, write nothing.

use anyhow::Result;
use clap::Args;

use relatum_reporter::config::Config;
use relatum_reporter::runner::{run_preview, PreviewOutcome, PreviewReport};

use crate::commands::block_on;
use crate::commands::report::PeriodArgs;
use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Force JSON output.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PreviewArgs) -> Result<ExitCode> {
    let format_out = OutputFormat::detect(args.json);
    let period = args.period.resolve()?;
    tracing::debug!(from = %period.from, to = %period.to, "resolved preview period");
    let config = Config::load().with_env_overrides();

    match block_on(run_preview(&config, &period))? {
        PreviewOutcome::Summarized(preview) => {
            output::print_output(format_out, &preview, format_human)?;
            Ok(ExitCode::Success)
        }
        PreviewOutcome::NoCommits { period_from, period_to } => {
            output::print_warning(
                format_out,
                "NO_COMMITS",
                &format!("no commits between {period_from} and {period_to}"),
            );
            Ok(ExitCode::Success)
        }
    }
}

fn format_human(preview: &PreviewReport) -> String {
    let mut out = format!(
        "Period {} to {} ({} commits)\n",
        preview.period_from, preview.period_to, preview.commit_count
    );
    for (bucket, block) in preview.sections.ordered() {
        out.push('\n');
        out.push_str(bucket.title());
        out.push('\n');
        if block.is_empty() {
            out.push_str("  (none)\n");
        } else {
            for line in block.lines() {
                out.push_str(&format!("  {} {line}\n", bucket.glyph()));
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relatum_common::report::ReportSections;
    use relatum_common::summary::tags::parse_summary;

    fn sample_preview() -> PreviewReport {
        let summary = parse_summary(
            "<completed>- fix login bug</completed><inprogress>- refactor cache</inprogress>",
        );
        PreviewReport {
            commit_count: 3,
            period_from: "01-06-2026".into(),
            period_to: "07-06-2026".into(),
            sections: ReportSections::from_summary(&summary),
        }
    }

    #[test]
    fn human_format_lists_sections_in_order() {
        let text = format_human(&sample_preview());
        assert!(text.starts_with("Period 01-06-2026 to 07-06-2026 (3 commits)"));
        let completed = text.find("1. Tasks completed 100%:").unwrap();
        let in_progress = text.find("2. Tasks continue to work on:").unwrap();
        let new = text.find("3. New tasks started:").unwrap();
        assert!(completed < in_progress && in_progress < new);
        assert!(text.contains("✅ fix login bug"));
        assert!(text.contains("⏳ refactor cache"));
    }

    #[test]
    fn empty_buckets_render_a_none_marker() {
        let text = format_human(&sample_preview());
        assert!(text.contains("3. New tasks started:\n  (none)"));
    }

    #[test]
    fn json_format_roundtrips() {
        let preview = sample_preview();
        let mut buf = Vec::new();
        output::write_output(&mut buf, OutputFormat::Json, &preview, format_human).unwrap();
        let parsed: PreviewReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, preview);
    }
}
