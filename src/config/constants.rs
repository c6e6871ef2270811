//! Configuration constants.
//!
//! Defaults for concurrency, timeouts and logging used throughout the crate.

/// Default cap on concurrently running domain workers.
pub const SEMAPHORE_LIMIT: usize = 20;
/// Upper bound accepted for `--max-concurrency`.
pub const MAX_CONCURRENCY_LIMIT: usize = 500;

/// Seconds between progress log lines while a batch is in flight.
pub const LOGGING_INTERVAL: u64 = 5;

// Network operation timeouts
/// Per-lookup deadline in seconds, applied to every MX query and every
/// address lookup.
pub const DNS_TIMEOUT_SECS: u64 = 10;
/// Attempts hickory makes per query before reporting a failure.
pub const DNS_ATTEMPTS: usize = 1;
/// Port used when a resolver address is given on the command line.
pub const DNS_PORT: u16 = 53;

/// Path value that makes `--input` read domains from stdin.
pub const STDIN_PATH: &str = "-";
