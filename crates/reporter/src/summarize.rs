// Status summarization via the Gemini text-generation API.
//
// Sends the window's commit lines with a bucketing prompt and
// returns the tagged three-section blob. Tag parsing happens
// downstream; a blob with no tags at all is the parser's problem,
// not a transport failure.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use relatum_common::types::CommitRecord;

use crate::config::GeminiConfig;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Prompt instructing the generator to bucket commits into the three
/// tag-delimited sections.
pub const BUCKETING_PROMPT: &str = "\
You are preparing a weekly engineering status report using the commit messages below.\n\
\n\
Organize the output into three sections:\n\
1. Tasks completed 100%\n\
2. Tasks continue to work on\n\
3. New tasks started\n\
\n\
Elaborate the commit messages if needed but do not club tasks together.\n\
\n\
Format the output like:\n\
<completed>\n\
- task 1 (url)\n\
</completed>\n\
\n\
<inprogress>\n\
- task 1 (url)\n\
</inprogress>\n\
\n\
<new>\n\
- task 1 (url)\n\
</new>\n";

#[derive(Debug)]
pub struct Summarizer {
    http: Client,
    config: GeminiConfig,
    base_url: Url,
}

impl Summarizer {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            bail!("gemini api_key must be configured");
        }
        let base_url = Url::parse(API_BASE_URL).context("invalid summarizer base url")?;
        Ok(Self { http: Client::new(), config, base_url })
    }

    /// Point the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// One dated line per commit, appended after the prompt.
    pub fn build_prompt(commits: &[CommitRecord]) -> String {
        let mut prompt = String::from(BUCKETING_PROMPT);
        prompt.push_str("\nCommit messages:\n");
        for commit in commits {
            prompt.push_str(&format!("{}: {} ({})\n", commit.date, commit.message, commit.url));
        }
        prompt
    }

    /// Returns the generator's raw tagged text, trimmed.
    pub async fn summarize(&self, commits: &[CommitRecord]) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(commits) }] }]
        });

        debug!(model = %self.config.model, commits = commits.len(), "requesting summary");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("summarizer request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("summarizer returned {status}: {body}");
        }

        let payload: Value =
            response.json().await.context("failed to decode summarizer response")?;
        extract_text(&payload)
    }
}

/// Pull the first candidate's concatenated text parts.
fn extract_text(payload: &Value) -> Result<String> {
    let parts = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .context("summarizer response has no candidates")?;
    let text: String =
        parts.iter().filter_map(|part| part.get("text").and_then(Value::as_str)).collect();
    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("summarizer returned an empty response");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn commits() -> Vec<CommitRecord> {
        vec![
            CommitRecord {
                date: NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
                message: "fix login bug".into(),
                url: "https://bitbucket.org/acme/app/commits/aaa".into(),
            },
            CommitRecord {
                date: NaiveDate::from_ymd_opt(2026, 6, 4).unwrap(),
                message: "refactor cache".into(),
                url: "https://bitbucket.org/acme/app/commits/bbb".into(),
            },
        ]
    }

    #[test]
    fn prompt_lists_each_commit_with_date_and_url() {
        let prompt = Summarizer::build_prompt(&commits());
        assert!(prompt.starts_with(BUCKETING_PROMPT));
        assert!(prompt.contains("2026-06-02: fix login bug (https://bitbucket.org/acme/app/commits/aaa)\n"));
        assert!(prompt.contains("2026-06-04: refactor cache (https://bitbucket.org/acme/app/commits/bbb)\n"));
    }

    #[test]
    fn prompt_names_the_three_tag_pairs() {
        for tag in ["<completed>", "</completed>", "<inprogress>", "</inprogress>", "<new>", "</new>"] {
            assert!(BUCKETING_PROMPT.contains(tag), "missing {tag}");
        }
    }

    #[test]
    fn extract_text_joins_candidate_parts_and_trims() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "  <completed>a</completed>" },
                    { "text": "<new>b</new>\n" }
                ]}
            }]
        });
        assert_eq!(extract_text(&payload).unwrap(), "<completed>a</completed><new>b</new>");
    }

    #[test]
    fn extract_text_without_candidates_is_an_error() {
        let error = extract_text(&json!({ "candidates": [] })).unwrap_err();
        assert!(error.to_string().contains("no candidates"));
    }

    #[test]
    fn extract_text_with_only_blank_parts_is_an_error() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        let error = extract_text(&payload).unwrap_err();
        assert!(error.to_string().contains("empty response"));
    }

    #[test]
    fn missing_api_key_is_rejected_up_front() {
        let error = Summarizer::new(GeminiConfig::default()).unwrap_err();
        assert!(error.to_string().contains("api_key must be configured"));
    }
}
