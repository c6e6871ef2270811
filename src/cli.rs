//! Command-line interface.
//!
//! # Examples
//!
//! ```bash
//! # Resolve with the system resolver
//! mx_resolve gmail.com aol.com
//!
//! # Ask a specific DNS server for the MX records
//! mx_resolve --dns 8.8.8.8 gmail.com
//!
//! # Read domains from a file and save the records
//! mx_resolve --input domains.txt --output records.txt
//!
//! # Single-dash spellings are accepted too
//! mx_resolve -dns 1.1.1.1 -input domains.txt -output records.jsonl --output-format jsonl
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    Config, FailOn, LogFormat, LogLevel, OutputFormat, DNS_TIMEOUT_SECS, SEMAPHORE_LIMIT,
};
use crate::run::RunRequest;

/// Single-dash flags rewritten to their double-dash form before parsing.
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-dns", "--dns"),
    ("-input", "--input"),
    ("-output", "--output"),
];

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "mx_resolve",
    about = "Resolves the MX records of a list of domains and the IP address of each mail exchanger."
)]
pub struct Cli {
    /// Domains to resolve
    #[arg(value_name = "DOMAIN", required_unless_present = "input")]
    pub domains: Vec<String>,

    /// IPv4 address of the DNS server to send MX queries to
    #[arg(long, value_name = "IP")]
    pub dns: Option<String>,

    /// File with one domain per line (`-` reads stdin)
    ///
    /// Blank lines and lines starting with `#` are skipped.
    #[arg(long, value_parser, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// File to save the resolved records to (overwritten)
    #[arg(long, value_parser, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format of the output file: text|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Maximum number of domains resolved at the same time
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit code policy: never|any-error|no-records
    ///
    /// `never` exits 0 once the batch has run. The other policies exit 2 when
    /// any error was reported, or when nothing resolved.
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

impl Cli {
    /// Library configuration carried by these options.
    pub fn to_config(&self) -> Config {
        Config {
            max_concurrency: self.max_concurrency,
            timeout_seconds: self.timeout_seconds,
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            fail_on: self.fail_on,
            output_format: self.output_format,
        }
    }

    /// Resolver address for the batch; `""` selects the default resolver.
    pub fn resolver_address(&self) -> &str {
        self.dns.as_deref().unwrap_or("")
    }

    /// Turns the options into a run request.
    pub fn into_request(self) -> RunRequest {
        let config = self.to_config();
        let resolver_address = self.resolver_address().to_string();
        RunRequest {
            domains: self.domains,
            input: self.input,
            output: self.output,
            resolver_address,
            config,
        }
    }
}

/// Rewrites `-dns`, `-input` and `-output` to their `--` spellings.
///
/// Only whole arguments are rewritten; `-dns=8.8.8.8` is left to clap.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            match LEGACY_FLAGS.iter().find(|(legacy, _)| arg == *legacy) {
                Some((_, modern)) => OsString::from(*modern),
                None => arg,
            }
        })
        .collect()
}
