// Document client seam.
//
// The runner talks to the remote document through this trait so the
// append paths can be exercised against a mock. The production
// implementation lives in `gdocs`.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

use relatum_common::plan::{DocumentPosition, EditOperation};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations the append paths need from the remote document
/// service. Each call is one blocking round trip; failures propagate
/// unchanged and the caller aborts any remaining phases.
pub trait DocumentClient: Send + Sync {
    /// Offset of the document's terminal content element.
    fn end_offset(&self) -> BoxFuture<'_, Result<DocumentPosition>>;

    /// Apply a batch atomically, in list order.
    fn submit_batch(&self, ops: Vec<EditOperation>) -> BoxFuture<'_, Result<()>>;

    /// Row-ordered cell insertion offsets of the last table in the
    /// document, one per row. Only meaningful against the snapshot
    /// the call observes; never reuse across batches.
    fn table_cell_offsets(&self) -> BoxFuture<'_, Result<Vec<DocumentPosition>>>;
}
