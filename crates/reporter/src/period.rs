// Report period windows: predefined weeks and explicit date ranges.
//
// Weeks start on Sunday. Labels render `%d-%m-%Y`, the format used
// verbatim in the report's period row.

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use relatum_common::types::PeriodLabels;

/// Inclusive UTC window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportPeriod {
    /// Sunday 00:00:00 of the week containing `now` through Saturday
    /// 23:59:59.
    pub fn this_week(now: DateTime<Utc>) -> Self {
        let days_since_sunday = (now.weekday().num_days_from_monday() + 1) % 7;
        let from = (now - Duration::days(days_since_sunday as i64))
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        Self { from, to: from + Duration::days(7) - Duration::seconds(1) }
    }

    /// The week before [`Self::this_week`].
    pub fn last_week(now: DateTime<Utc>) -> Self {
        let ReportPeriod { from, to } = Self::this_week(now);
        Self { from: from - Duration::days(7), to: to - Duration::days(7) }
    }

    /// Explicit window from `from` at midnight through `to` at
    /// 23:59:59, both UTC.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if to < from {
            bail!("end date cannot be before start date");
        }
        let from = from.and_time(NaiveTime::MIN).and_utc();
        let to = to.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1);
        Ok(Self { from, to })
    }

    /// Pre-formatted labels for the report heading and period row.
    pub fn labels(&self) -> PeriodLabels {
        PeriodLabels {
            from: self.from.format("%d-%m-%Y").to_string(),
            to: self.to.format("%d-%m-%Y").to_string(),
        }
    }
}
