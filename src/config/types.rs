//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::ValueEnum;
use thiserror::Error;

use crate::config::constants::{DNS_TIMEOUT_SECS, MAX_CONCURRENCY_LIMIT, SEMAPHORE_LIMIT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit code policy applied after a batch completes.
///
/// Lookup failures never abort a batch, so by default the process exits 0
/// whatever the outcome. The other policies turn failures into exit code 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the batch has run
    Never,
    /// Exit 2 if any resolution error was reported
    AnyError,
    /// Exit 2 if no record was resolved
    NoRecords,
}

/// File format used by `--output`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One formatted record line per resolved mail exchanger
    Text,
    /// One JSON object per resolved mail exchanger
    Jsonl,
}

/// Errors reported by [`Config::validate`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Concurrency must allow at least one worker.
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    /// Concurrency above the supported ceiling.
    #[error("max_concurrency {0} exceeds the limit of {limit}", limit = MAX_CONCURRENCY_LIMIT)]
    ExcessiveConcurrency(usize),

    /// A zero deadline would fail every lookup.
    #[error("timeout_seconds must be at least 1")]
    ZeroTimeout,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use mx_resolve::Config;
///
/// let config = Config {
///     max_concurrency: 50,
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of domains resolved at the same time
    pub max_concurrency: usize,

    /// Per-lookup deadline in seconds
    pub timeout_seconds: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Exit code policy
    pub fail_on: FailOn,

    /// Format of the `--output` file
    pub output_format: OutputFormat,
}

impl Config {
    /// Checks that the configuration can drive a batch.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(ConfigError::ExcessiveConcurrency(self.max_concurrency));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// The per-lookup deadline.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrency: SEMAPHORE_LIMIT,
            timeout_seconds: DNS_TIMEOUT_SECS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            fail_on: FailOn::Never,
            output_format: OutputFormat::Text,
        }
    }
}
