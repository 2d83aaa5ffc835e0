// relatum CLI entry point.

use clap::Parser;

mod commands;
mod exit_code;
mod output;

#[derive(Parser)]
#[command(name = "relatum", about = "Weekly status reports from commit history")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(cli.command) {
        Ok(code) => code.into(),
        Err(error) => {
            output::print_anyhow_error(output::OutputFormat::detect(false), &error);
            exit_code::ExitCode::from_error(&error).into()
        }
    }
}
