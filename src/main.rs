//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mx_resolve` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Start and end banners
//! - The process exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mx_resolve::app::{end_banner, start_banner};
use mx_resolve::cli::{normalize_legacy_flags, Cli};
use mx_resolve::initialization::init_logger_with;
use mx_resolve::run_resolve;

#[tokio::main]
async fn main() -> Result<()> {
    // Accept -dns / -input / -output as well as the -- spellings
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    let config = cli.to_config();
    if let Err(e) = config.validate() {
        eprintln!("mx_resolve error: {e}");
        process::exit(1);
    }

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    println!("{}", start_banner());

    let fail_on = config.fail_on;
    let mut stdout = std::io::stdout();
    match run_resolve(cli.into_request(), &mut stdout).await {
        Ok(report) => {
            println!("{}", end_banner());
            process::exit(report.exit_code(fail_on));
        }
        Err(e) => {
            eprintln!("mx_resolve error: {:#}", e);
            process::exit(1);
        }
    }
}
