// Bitbucket commit feed client: pagination, windowing, author filter.
//
// The feed is newest-first; paging stops at the first commit that
// predates the window. Commits after the window end, merge commits,
// and foreign authors are skipped.

use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use relatum_common::types::CommitRecord;

use crate::config::BitbucketConfig;
use crate::period::ReportPeriod;

const API_BASE_URL: &str = "https://api.bitbucket.org/2.0/";
const WEB_BASE_URL: &str = "https://bitbucket.org";

#[derive(Debug, Deserialize)]
struct CommitsPage {
    #[serde(default)]
    values: Vec<ApiCommit>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    hash: String,
    date: DateTime<FixedOffset>,
    message: String,
    #[serde(default)]
    author: ApiAuthor,
}

#[derive(Debug, Default, Deserialize)]
struct ApiAuthor {
    #[serde(default)]
    raw: String,
    user: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(default)]
    username: String,
}

/// What to do with one feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Keep,
    Skip,
    /// Entry predates the window; everything after it does too.
    StopPaging,
}

#[derive(Debug)]
pub struct CommitFeed {
    http: Client,
    config: BitbucketConfig,
    base_url: Url,
}

impl CommitFeed {
    pub fn new(config: BitbucketConfig) -> Result<Self> {
        if config.workspace.is_empty() || config.repo_slug.is_empty() {
            bail!("bitbucket workspace and repo_slug must be configured");
        }
        let base_url = Url::parse(API_BASE_URL).context("invalid commit feed base url")?;
        Ok(Self { http: Client::new(), config, base_url })
    }

    /// Point the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch the window's commits, in the order the feed returns
    /// them (newest first).
    pub async fn fetch_window(&self, period: &ReportPeriod) -> Result<Vec<CommitRecord>> {
        let mut page_url = self
            .base_url
            .join(&format!(
                "repositories/{}/{}/commits",
                self.config.workspace, self.config.repo_slug
            ))
            .context("failed to build commit feed url")?;

        let mut commits = Vec::new();
        loop {
            debug!(url = %page_url, "fetching commit feed page");
            let response = self
                .http
                .get(page_url.clone())
                .basic_auth(&self.config.username, Some(&self.config.app_password))
                .send()
                .await
                .context("commit feed request failed")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                bail!("commit feed returned {status}: {body}");
            }

            let page: CommitsPage =
                response.json().await.context("failed to decode commit feed page")?;

            let mut stop = false;
            for commit in &page.values {
                match classify(commit, period, &self.config) {
                    Disposition::StopPaging => {
                        stop = true;
                        break;
                    }
                    Disposition::Skip => {}
                    Disposition::Keep => commits.push(self.to_record(commit)),
                }
            }

            if stop {
                break;
            }
            match page.next {
                Some(next) => {
                    page_url = Url::parse(&next).context("invalid commit feed next link")?;
                }
                None => break,
            }
        }

        info!(count = commits.len(), "commit window fetched");
        Ok(commits)
    }

    fn to_record(&self, commit: &ApiCommit) -> CommitRecord {
        CommitRecord {
            // Calendar date in the commit's own zone.
            date: commit.date.date_naive(),
            message: commit.message.trim().to_string(),
            url: format!(
                "{WEB_BASE_URL}/{}/{}/commits/{}",
                self.config.workspace, self.config.repo_slug, commit.hash
            ),
        }
    }
}

fn classify(commit: &ApiCommit, period: &ReportPeriod, filter: &BitbucketConfig) -> Disposition {
    let date = commit.date.with_timezone(&Utc);
    if date < period.from {
        return Disposition::StopPaging;
    }
    if date > period.to {
        // A commit from after the window; keep paging backwards.
        return Disposition::Skip;
    }
    if !author_allowed(&commit.author, filter) {
        return Disposition::Skip;
    }
    if is_merge_commit(commit.message.trim()) {
        return Disposition::Skip;
    }
    Disposition::Keep
}

fn author_allowed(author: &ApiAuthor, filter: &BitbucketConfig) -> bool {
    let email_matches = !filter.email.is_empty() && author.raw.contains(&filter.email);
    let username_matches = !filter.username.is_empty()
        && author.user.as_ref().is_some_and(|user| user.username == filter.username);
    email_matches || username_matches
}

fn is_merge_commit(message: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)^merge\b").expect("merge pattern should compile"))
        .is_match(message)
}
