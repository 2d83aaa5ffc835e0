// `relatum report` — run the full pipeline and append to the document.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, ValueEnum};

use relatum_reporter::config::Config;
use relatum_reporter::period::ReportPeriod;
use relatum_reporter::runner::{run_report, ReportFormat, RunOutcome, RunReport};

use crate::commands::block_on;
use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report format appended to the document.
    #[arg(long, value_enum)]
    pub format: FormatArg,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Force JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Bullet,
    Table,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Bullet => ReportFormat::Bullet,
            FormatArg::Table => ReportFormat::Table,
        }
    }
}

/// Period selection flags shared by `report` and `preview`.
#[derive(Debug, Args)]
pub struct PeriodArgs {
    /// Predefined range; overrides the explicit dates.
    #[arg(long, value_enum)]
    pub range: Option<RangeArg>,

    /// Start date (YYYY-MM-DD); required without --range.
    #[arg(long)]
    pub from_date: Option<NaiveDate>,

    /// End date (YYYY-MM-DD); required without --range.
    #[arg(long)]
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RangeArg {
    ThisWeek,
    LastWeek,
}

impl PeriodArgs {
    pub fn resolve(&self) -> Result<ReportPeriod> {
        match (self.range, self.from_date, self.to_date) {
            (Some(RangeArg::ThisWeek), _, _) => Ok(ReportPeriod::this_week(Utc::now())),
            (Some(RangeArg::LastWeek), _, _) => Ok(ReportPeriod::last_week(Utc::now())),
            (None, Some(from), Some(to)) => ReportPeriod::from_dates(from, to),
            _ => anyhow::bail!("specify --range or both --from-date and --to-date"),
        }
    }
}

pub fn run(args: ReportArgs) -> Result<ExitCode> {
    let format_out = OutputFormat::detect(args.json);
    let period = args.period.resolve()?;
    tracing::debug!(from = %period.from, to = %period.to, "resolved report period");
    let config = Config::load().with_env_overrides();

    match block_on(run_report(&config, &period, args.format.into()))? {
        RunOutcome::Written(report) => {
            output::print_output(format_out, &report, format_human)?;
            Ok(ExitCode::Success)
        }
        RunOutcome::NoCommits { period_from, period_to } => {
            output::print_warning(
                format_out,
                "NO_COMMITS",
                &format!("no commits between {period_from} and {period_to}; nothing written"),
            );
            Ok(ExitCode::NoCommits)
        }
    }
}

fn format_human(report: &RunReport) -> String {
    let format = match report.format {
        ReportFormat::Bullet => "bullet",
        ReportFormat::Table => "table",
    };
    format!(
        "Appended {format} report covering {} to {} ({} commits, {} operations)",
        report.period_from, report.period_to, report.commit_count, report.operations_applied
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period_args(
        range: Option<RangeArg>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> PeriodArgs {
        PeriodArgs {
            range,
            from_date: from.map(|d| d.parse().unwrap()),
            to_date: to.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn explicit_dates_resolve_to_their_window() {
        let args = period_args(None, Some("2026-06-01"), Some("2026-06-07"));
        let period = args.resolve().unwrap();
        assert_eq!(period.labels().from, "01-06-2026");
        assert_eq!(period.labels().to, "07-06-2026");
    }

    #[test]
    fn range_overrides_explicit_dates() {
        let args =
            period_args(Some(RangeArg::ThisWeek), Some("2020-01-01"), Some("2020-01-02"));
        let period = args.resolve().unwrap();
        assert!(period.labels().from != "01-01-2020");
    }

    #[test]
    fn missing_both_range_and_dates_is_an_error() {
        let args = period_args(None, Some("2026-06-01"), None);
        let error = args.resolve().unwrap_err();
        assert!(error.to_string().contains("--from-date and --to-date"));
    }

    #[test]
    fn human_format_names_the_strategy_and_counts() {
        let report = RunReport {
            commit_count: 5,
            format: ReportFormat::Table,
            operations_applied: 8,
            period_from: "01-06-2026".into(),
            period_to: "07-06-2026".into(),
        };
        let line = format_human(&report);
        assert!(line.contains("table report"));
        assert!(line.contains("01-06-2026"));
        assert!(line.contains("5 commits"));
        assert!(line.contains("8 operations"));
    }

    #[test]
    fn json_format_roundtrips() {
        let report = RunReport {
            commit_count: 2,
            format: ReportFormat::Bullet,
            operations_applied: 12,
            period_from: "01-06-2026".into(),
            period_to: "07-06-2026".into(),
        };
        let mut buf = Vec::new();
        output::write_output(&mut buf, OutputFormat::Json, &report, format_human).unwrap();
        let parsed: RunReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, report);
    }
}
