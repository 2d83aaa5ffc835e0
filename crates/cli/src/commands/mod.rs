// CLI subcommand dispatch.

use std::future::Future;

use clap::Subcommand;

use crate::exit_code::ExitCode;

pub mod preview;
pub mod report;
pub mod setup;

#[derive(Subcommand)]
pub enum Command {
    /// Generate a status report and append it to the configured document
    Report(report::ReportArgs),
    /// Fetch and summarize without writing to the document
    Preview(preview::PreviewArgs),
    /// Write a starter configuration file
    Setup(setup::SetupArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<ExitCode> {
    match cmd {
        Command::Report(args) => report::run(args),
        Command::Preview(args) => preview::run(args),
        Command::Setup(args) => setup::run(args),
    }
}

/// Drive a future to completion from sync command code, reusing an
/// ambient runtime when one exists.
pub fn block_on<F: Future>(future: F) -> F::Output {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(future),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime should build")
            .block_on(future),
    }
}
