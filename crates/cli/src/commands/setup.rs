// `relatum setup` — write a starter configuration file.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use relatum_reporter::config::{config_path, Config};

use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,

    /// Force JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupResult {
    pub path: String,
    pub created: bool,
}

pub fn run(args: SetupArgs) -> Result<ExitCode> {
    let format = OutputFormat::detect(args.json);

    let path = config_path().context("could not determine home directory")?;
    if path.exists() && !args.force {
        bail!("config file `{}` already exists (use --force to overwrite)", path.display());
    }

    Config::default()
        .save_to(&path)
        .with_context(|| format!("failed to write config file `{}`", path.display()))?;

    let result = SetupResult { path: path.display().to_string(), created: true };
    output::print_output(format, &result, format_human)?;
    Ok(ExitCode::Success)
}

fn format_human(result: &SetupResult) -> String {
    format!(
        "Wrote starter config to {}. Fill in credentials before running `relatum report`",
        result.path
    )
}
