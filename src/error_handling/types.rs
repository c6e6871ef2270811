//! Error type definitions.
//!
//! This module defines the per-item resolution errors reported in a batch
//! result, plus the errors raised while setting up the application and while
//! reading or writing domain files.

use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised by the domain file reader and the record file writer.
#[derive(Error, Debug)]
pub enum FileError {
    /// The input file does not exist.
    #[error("The file \"{}\" does not exist", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The input could not be read.
    #[error("Failed to read \"{}\": {source}", path.display())]
    Read {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("Failed to write \"{}\": {source}", path.display())]
    Write {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized for the JSONL output.
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which lookup a timeout applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// The MX query for a domain
    Mx,
    /// The address lookup for one mail exchanger
    Address,
}

impl std::fmt::Display for LookupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupStage::Mx => f.write_str("MX lookup"),
            LookupStage::Address => f.write_str("address lookup"),
        }
    }
}

/// A failure tied to one input item.
///
/// Every variant names the input (domain, resolver address, or mail exchanger)
/// it belongs to. None of them aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The domain does not match the domain grammar.
    #[error("\"{domain}\" is not a valid domain and will be ignored")]
    InvalidDomain {
        /// Domain as supplied by the caller
        domain: String,
    },

    /// The resolver address is not a dotted-quad IPv4 address. The batch falls
    /// back to the default resolver.
    #[error("\"{address}\" is not a valid IP Address and will not resolve to any of the provided domains")]
    InvalidResolverAddress {
        /// Address as supplied by the caller
        address: String,
    },

    /// The MX query returned no answers (or the name does not exist).
    #[error("\"{domain}\" was unable to resolve and will be ignored")]
    NoMxRecords {
        /// Queried domain
        domain: String,
    },

    /// The MX query failed at the transport level.
    #[error("\"{domain}\" MX lookup failed: {reason}")]
    MxLookupFailed {
        /// Queried domain
        domain: String,
        /// Resolver error text
        reason: String,
    },

    /// A lookup did not finish before the per-lookup deadline.
    #[error("\"{target}\" {stage} timed out after {timeout:?}")]
    LookupTimeout {
        /// Domain or exchange hostname being looked up
        target: String,
        /// Lookup that timed out
        stage: LookupStage,
        /// Deadline that expired
        timeout: Duration,
    },

    /// The mail exchanger of an MX answer did not resolve to any address.
    #[error("\"{exchange}\" (mail exchanger for \"{domain}\") did not resolve to an IP address: {reason}")]
    AddressLookupFailed {
        /// Domain the MX answer belongs to
        domain: String,
        /// Mail exchanger hostname
        exchange: String,
        /// Resolver error text
        reason: String,
    },

    /// The worker resolving the domain stopped abnormally.
    #[error("\"{domain}\" could not be processed: {reason}")]
    WorkerFailed {
        /// Domain handled by the worker
        domain: String,
        /// Join error text
        reason: String,
    },
}

impl ResolutionError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolutionError::InvalidDomain { .. } => ErrorKind::InvalidDomain,
            ResolutionError::InvalidResolverAddress { .. } => ErrorKind::InvalidResolverAddress,
            ResolutionError::NoMxRecords { .. } => ErrorKind::NoMxRecords,
            ResolutionError::MxLookupFailed { .. } => ErrorKind::MxLookupFailed,
            ResolutionError::LookupTimeout { .. } => ErrorKind::LookupTimeout,
            ResolutionError::AddressLookupFailed { .. } => ErrorKind::AddressLookupFailed,
            ResolutionError::WorkerFailed { .. } => ErrorKind::WorkerFailed,
        }
    }
}

/// Categories of [`ResolutionError`], used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum ErrorKind {
    /// See [`ResolutionError::InvalidDomain`]
    InvalidDomain,
    /// See [`ResolutionError::InvalidResolverAddress`]
    InvalidResolverAddress,
    /// See [`ResolutionError::NoMxRecords`]
    NoMxRecords,
    /// See [`ResolutionError::MxLookupFailed`]
    MxLookupFailed,
    /// See [`ResolutionError::LookupTimeout`]
    LookupTimeout,
    /// See [`ResolutionError::AddressLookupFailed`]
    AddressLookupFailed,
    /// See [`ResolutionError::WorkerFailed`]
    WorkerFailed,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Human-readable label used in the statistics summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDomain => "Invalid domain",
            ErrorKind::InvalidResolverAddress => "Invalid resolver address",
            ErrorKind::NoMxRecords => "No MX records",
            ErrorKind::MxLookupFailed => "MX lookup failed",
            ErrorKind::LookupTimeout => "Lookup timeout",
            ErrorKind::AddressLookupFailed => "Address lookup failed",
            ErrorKind::WorkerFailed => "Worker failed",
        }
    }
}
