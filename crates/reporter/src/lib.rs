// relatum-reporter: remote collaborators and report orchestration.
//
// Pure planning lives in relatum-common; this crate owns the commit
// feed, the summarizer, the document client, and the runner that
// drives a full report run.

pub mod commits;
pub mod config;
pub mod docs;
pub mod gdocs;
pub mod period;
pub mod runner;
pub mod summarize;
