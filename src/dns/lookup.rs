//! Lookup capabilities consumed by the resolution engine.
//!
//! The engine only sees these traits. [`HickoryLookup`](super::HickoryLookup)
//! implements both against real DNS; tests plug in deterministic stubs.

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use serde::Serialize;
use thiserror::Error;

/// One answer of an MX query.
///
/// Ordering is by preference, then exchange hostname.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MxAnswer {
    /// Preference value (lower is preferred)
    pub preference: u16,
    /// Mail exchanger hostname, without the trailing root dot
    pub exchange: String,
}

impl MxAnswer {
    /// Creates an answer.
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Failure of a single lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name exists with no records of the requested type, or does not exist.
    #[error("no records found")]
    NoRecords,

    /// The resolver gave up waiting for an answer.
    #[error("request timed out")]
    Timeout,

    /// The query itself failed (refused, network error, malformed answer).
    #[error("{0}")]
    Transport(String),
}

impl From<ResolveError> for LookupError {
    fn from(e: ResolveError) -> Self {
        match e.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => LookupError::NoRecords,
            ResolveErrorKind::Timeout => LookupError::Timeout,
            _ => LookupError::Transport(e.to_string()),
        }
    }
}

/// Performs MX queries.
#[async_trait]
pub trait MxLookup: Send + Sync {
    /// Queries the MX records of `domain`.
    ///
    /// `nameserver` selects the DNS server to ask; `None` means the default
    /// resolver. An empty `Ok` vector is a valid answer.
    async fn lookup_mx(
        &self,
        domain: &str,
        nameserver: Option<Ipv4Addr>,
    ) -> Result<Vec<MxAnswer>, LookupError>;
}

/// Resolves hostnames to IP addresses.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Returns every address of `host`, in resolver order.
    async fn lookup_addresses(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}
