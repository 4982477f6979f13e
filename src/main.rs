//! parfind - parallel name search
//!
//! Entry point for the CLI application.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use parfind::config::CliArgs;
use parfind::{find, ConsoleReporter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = CliArgs::parse();

    setup_logging(args.verbose)?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let (request, options) = args.into_search();
    let results = find(&request, &options, &ConsoleReporter)?;

    debug!(matches = results.matches, skipped = results.errors.len(), "search complete");

    if results.is_partial() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("parfind=debug,warn"),
        Err(_) => EnvFilter::new("parfind=warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")
}
