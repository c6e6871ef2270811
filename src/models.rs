//! Data model of a resolution batch.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Serialize;

use crate::error_handling::{ErrorKind, ResolutionError};

/// One mail exchanger of a domain together with the address it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedRecord {
    /// Domain the MX query was made for
    pub domain: String,
    /// MX preference value
    pub preference: u16,
    /// Mail exchanger hostname
    pub exchange: String,
    /// First address the exchange resolved to
    pub ip: IpAddr,
}

/// Outcome of one engine invocation.
///
/// Records are ordered by input position, then by (preference, exchange)
/// within a domain. Errors follow the same input order, with the resolver
/// address error (if any) first.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Successfully resolved mail exchangers
    pub records: Vec<ResolvedRecord>,
    /// Per-item failures
    pub errors: Vec<ResolutionError>,
    /// Number of domains submitted
    pub domains: usize,
    /// Non-zero error counts per category
    pub error_counts: BTreeMap<ErrorKind, usize>,
    /// Wall-clock duration of the batch in seconds
    pub elapsed_seconds: f64,
}

impl BatchResult {
    /// `true` if at least one record resolved.
    pub fn is_resolved(&self) -> bool {
        !self.records.is_empty()
    }

    /// Number of errors of the given kind.
    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.error_counts.get(&kind).copied().unwrap_or(0)
    }
}
