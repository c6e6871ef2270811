//! End-to-end run: gather domains, resolve them, report, export.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use crate::app::console::{render, styled, MessageKind};
use crate::app::{print_batch_statistics, read_domains, write_records};
use crate::config::{Config, FailOn};
use crate::engine::ResolutionEngine;
use crate::models::BatchResult;
use crate::report::summarize;

/// Exit code when the `--fail-on` policy is triggered.
pub const EXIT_POLICY_FAILURE: i32 = 2;

/// What to resolve and where the results go.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Domains given directly
    pub domains: Vec<String>,
    /// File (or `-` for stdin) with more domains, appended after `domains`
    pub input: Option<PathBuf>,
    /// File the resolved records are written to
    pub output: Option<PathBuf>,
    /// Resolver for MX queries; `""` selects the default resolver
    pub resolver_address: String,
    /// Engine and output settings
    pub config: Config,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The resolved batch
    pub batch: BatchResult,
    /// Path of the exported record file, if the export succeeded
    pub exported: Option<PathBuf>,
}

impl RunReport {
    /// Process exit code under the given policy.
    pub fn exit_code(&self, fail_on: FailOn) -> i32 {
        evaluate_exit_code(fail_on, &self.batch)
    }
}

/// Maps a finished batch to a process exit code.
///
/// Lookup failures are reported but never fatal, so `FailOn::Never` always
/// yields 0.
pub fn evaluate_exit_code(fail_on: FailOn, result: &BatchResult) -> i32 {
    match fail_on {
        FailOn::Never => 0,
        FailOn::AnyError if !result.errors.is_empty() => EXIT_POLICY_FAILURE,
        FailOn::NoRecords if !result.is_resolved() => EXIT_POLICY_FAILURE,
        FailOn::AnyError | FailOn::NoRecords => 0,
    }
}

/// Runs a request against real DNS, writing the report to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails. Input, lookup and export
/// failures are reported in the output instead.
pub async fn run_resolve<W: Write>(request: RunRequest, out: &mut W) -> Result<RunReport> {
    let engine = ResolutionEngine::from_config(&request.config);
    run_with_engine(&engine, request, out).await
}

/// Runs a request with the given engine, writing the report to `out`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub async fn run_with_engine<W: Write>(
    engine: &ResolutionEngine,
    request: RunRequest,
    out: &mut W,
) -> Result<RunReport> {
    let RunRequest {
        mut domains,
        input,
        output,
        resolver_address,
        config,
    } = request;

    if let Some(path) = input {
        match read_domains(&path).await {
            Ok(read) => {
                domains.extend(read);
                let message = format!("The file \"{}\" was read successfully!", path.display());
                writeln!(out, "{}", styled(MessageKind::Success, &message))
                    .context("Failed to write report")?;
            }
            Err(e) => {
                warn!("{e}");
                writeln!(out, "{}", styled(MessageKind::Error, &e.to_string()))
                    .context("Failed to write report")?;
            }
        }
    }

    let batch = engine.resolve(&domains, &resolver_address).await;

    for line in summarize(&batch) {
        writeln!(out, "{}", render(&line)).context("Failed to write report")?;
    }

    let mut exported = None;
    if let Some(path) = output {
        match write_records(&path, &batch.records, config.output_format).await {
            Ok(()) => {
                let message = format!("The file \"{}\" was exported successfully!", path.display());
                writeln!(out, "{}", styled(MessageKind::Success, &message))
                    .context("Failed to write report")?;
                exported = Some(path);
            }
            Err(e) => {
                warn!("{e}");
                writeln!(out, "{}", styled(MessageKind::Error, &e.to_string()))
                    .context("Failed to write report")?;
            }
        }
    }

    print_batch_statistics(&batch);

    Ok(RunReport { batch, exported })
}
