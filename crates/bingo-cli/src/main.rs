//! bingo-register - replace the bot's registered commands and print an invite link.

use bingo_cli::config::Config;
use bingo_cli::logging::{self, LogConfig, LogFormat};
use bingo_cli::runner::{self, RunOptions};
use bingo_core::{RegistrarError, Report};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Register the bingo bot's slash commands with the platform.
#[derive(Parser, Debug)]
#[command(name = "bingo-register")]
#[command(about = "Replace the bot's registered commands and print its invite link")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the registry API base URL
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Build and print the catalog without contacting the registry
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "sync=debug").
    /// Targets are prefixed with "bingo::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            let err = RegistrarError::Configuration(format!("{:#}", e));
            tracing::error!(target: "bingo::startup", "{}", err);
            return emit(&Report::failure(&err));
        }
    };

    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    tracing::debug!(target: "bingo::startup", "Using registry at {}", config.api_base);

    let report = runner::run(
        &config,
        |key| std::env::var(key).ok(),
        RunOptions {
            dry_run: cli.dry_run,
        },
    )
    .await;

    emit(&report)
}

/// Print the report to stdout and map it to the process exit status.
fn emit(report: &Report) -> ExitCode {
    match report.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            tracing::error!(target: "bingo::startup", "Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}
