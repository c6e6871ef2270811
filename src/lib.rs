//! mx_resolve library: MX record resolution for batches of domains
//!
//! This library validates domain names, queries their MX records (optionally
//! against a specific DNS server), resolves each mail exchanger to an IP
//! address, and reports every success and failure of the batch without letting
//! one domain affect another.
//!
//! # Example
//!
//! ```no_run
//! use mx_resolve::{format_record, Config, ResolutionEngine};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let engine = ResolutionEngine::from_config(&Config::default());
//! let result = engine.resolve(&["gmail.com", "aol.com", "hotmail"], "8.8.8.8").await;
//!
//! for error in &result.errors {
//!     eprintln!("{error}");
//! }
//! for record in &result.records {
//!     println!("{}", format_record(record));
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
mod engine;
mod error_handling;
pub mod initialization;
mod models;
pub mod report;
mod run;
mod validation;

// Re-export public API
pub use config::{Config, ConfigError, FailOn, LogFormat, LogLevel, OutputFormat};
pub use dns::{AddressLookup, HickoryLookup, LookupError, MxAnswer, MxLookup};
pub use engine::ResolutionEngine;
pub use error_handling::{ErrorKind, FileError, InitializationError, LookupStage, ResolutionError};
pub use models::{BatchResult, ResolvedRecord};
pub use report::{format_record, summarize, LineKind, ReportLine};
pub use run::{
    evaluate_exit_code, run_resolve, run_with_engine, RunReport, RunRequest, EXIT_POLICY_FAILURE,
};
pub use validation::{is_valid_domain, is_valid_ipv4, parse_ipv4};
