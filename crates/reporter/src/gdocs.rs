// Google Docs implementation of the document client.
//
// Maps `EditOperation` values onto `batchUpdate` request objects and
// reads structure via `documents.get`. The access token comes from
// configuration; obtaining one is out of scope.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use relatum_common::plan::{DocumentPosition, EditOperation, PlanError};

use crate::config::GoogleDocsConfig;
use crate::docs::{BoxFuture, DocumentClient};

const API_BASE_URL: &str = "https://docs.googleapis.com/v1/documents";

/// Bullet preset applied by `CreateBullets` operations.
const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";

#[derive(Debug)]
pub struct GoogleDocsClient {
    http: Client,
    config: GoogleDocsConfig,
    base_url: Url,
}

impl GoogleDocsClient {
    pub fn new(config: GoogleDocsConfig) -> Result<Self> {
        if config.document_id.is_empty() || config.access_token.is_empty() {
            bail!("google_docs document_id and access_token must be configured");
        }
        let base_url = Url::parse(API_BASE_URL).context("invalid document api base url")?;
        Ok(Self { http: Client::new(), config, base_url })
    }

    /// Point the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    async fn get_document(&self) -> Result<Value> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.config.document_id
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .context("document read request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("document service returned {status}: {body}");
        }
        response.json().await.context("failed to decode document")
    }

    async fn post_batch(&self, requests: Vec<Value>) -> Result<()> {
        let url = format!(
            "{}/{}:batchUpdate",
            self.base_url.as_str().trim_end_matches('/'),
            self.config.document_id
        );
        debug!(requests = requests.len(), "submitting edit batch");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .context("batch update request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("document service returned {status}: {body}");
        }
        Ok(())
    }
}

impl DocumentClient for GoogleDocsClient {
    fn end_offset(&self) -> BoxFuture<'_, Result<DocumentPosition>> {
        Box::pin(async move { document_end_offset(&self.get_document().await?) })
    }

    fn submit_batch(&self, ops: Vec<EditOperation>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let requests = ops.iter().map(op_to_request).collect();
            self.post_batch(requests).await
        })
    }

    fn table_cell_offsets(&self) -> BoxFuture<'_, Result<Vec<DocumentPosition>>> {
        Box::pin(async move { last_table_cell_offsets(&self.get_document().await?) })
    }
}

/// Wire form of one edit operation.
pub(crate) fn op_to_request(op: &EditOperation) -> Value {
    match op {
        EditOperation::InsertText { at, text } => json!({
            "insertText": { "location": { "index": at }, "text": text }
        }),
        EditOperation::InsertPageBreak { at } => json!({
            "insertPageBreak": { "location": { "index": at } }
        }),
        EditOperation::SetTextStyle { start, end, style } => json!({
            "updateTextStyle": {
                "range": { "startIndex": start, "endIndex": end },
                "textStyle": {
                    "bold": style.bold,
                    "fontSize": { "magnitude": style.font_size_pt, "unit": "PT" },
                    "weightedFontFamily": { "fontFamily": style.font_family },
                },
                "fields": "bold,fontSize,weightedFontFamily",
            }
        }),
        EditOperation::InsertTable { at, rows, columns } => json!({
            "insertTable": { "rows": rows, "columns": columns, "location": { "index": at } }
        }),
        EditOperation::CreateBullets { start, end } => json!({
            "createParagraphBullets": {
                "range": { "startIndex": start, "endIndex": end },
                "bulletPreset": BULLET_PRESET,
            }
        }),
    }
}

/// `endIndex` of the last structural element in the body.
pub(crate) fn document_end_offset(doc: &Value) -> Result<DocumentPosition> {
    let content = doc
        .pointer("/body/content")
        .and_then(Value::as_array)
        .context("document has no body content")?;
    let last = content.last().context("document body is empty")?;
    let end = last
        .get("endIndex")
        .and_then(Value::as_u64)
        .context("terminal element has no endIndex")?;
    Ok(end as DocumentPosition)
}

/// Row-ordered start offsets of the last table's single-column
/// cells. A row with any other column count is a layout mismatch.
pub(crate) fn last_table_cell_offsets(doc: &Value) -> Result<Vec<DocumentPosition>> {
    let content = doc
        .pointer("/body/content")
        .and_then(Value::as_array)
        .context("document has no body content")?;
    let table = content
        .iter()
        .rev()
        .find(|element| element.get("table").is_some())
        .context("no table found in document")?;
    let rows = table
        .pointer("/table/tableRows")
        .and_then(Value::as_array)
        .context("table has no rows")?;

    rows.iter()
        .enumerate()
        .map(|(row, value)| {
            let cells = value
                .pointer("/tableCells")
                .and_then(Value::as_array)
                .with_context(|| format!("table row {row} has no cells"))?;
            if cells.len() != 1 {
                return Err(
                    PlanError::ColumnCountMismatch { row, actual: cells.len() }.into()
                );
            }
            cells[0]
                .pointer("/content/0/paragraph/elements/0/startIndex")
                .and_then(Value::as_u64)
                .map(|index| index as DocumentPosition)
                .with_context(|| format!("table row {row} has no readable cell offset"))
        })
        .collect()
}
