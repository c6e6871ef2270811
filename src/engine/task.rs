//! Per-domain task processing.
//!
//! One task runs for each submitted domain: validation, the MX query, then an
//! address lookup per MX answer, in that order. Failures are returned as part
//! of the outcome so sibling tasks never observe them.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dns::{AddressLookup, LookupError, MxAnswer, MxLookup};
use crate::error_handling::{ErrorStats, LookupStage, ResolutionError};
use crate::models::ResolvedRecord;
use crate::validation::is_valid_domain;

/// Read-only state shared by every task of a batch.
pub(crate) struct TaskContext {
    pub mx: Arc<dyn MxLookup>,
    pub addresses: Arc<dyn AddressLookup>,
    /// Resolver for MX queries, decided once before fan-out
    pub nameserver: Option<Ipv4Addr>,
    pub lookup_timeout: Duration,
    pub stats: Arc<ErrorStats>,
    pub completed: Arc<AtomicUsize>,
}

/// What one task produced.
#[derive(Debug, Default)]
pub(crate) struct DomainOutcome {
    pub records: Vec<ResolvedRecord>,
    pub errors: Vec<ResolutionError>,
}

impl DomainOutcome {
    pub fn failed(error: ResolutionError) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![error],
        }
    }
}

/// Resolves one domain and records its errors in the batch statistics.
pub(crate) async fn resolve_domain(ctx: &TaskContext, domain: &str) -> DomainOutcome {
    let outcome = process_domain(ctx, domain).await;
    for error in &outcome.errors {
        log::debug!("{error}");
        ctx.stats.increment(error.kind());
    }
    ctx.completed.fetch_add(1, Ordering::SeqCst);
    outcome
}

async fn process_domain(ctx: &TaskContext, domain: &str) -> DomainOutcome {
    if !is_valid_domain(domain) {
        return DomainOutcome::failed(ResolutionError::InvalidDomain {
            domain: domain.to_string(),
        });
    }

    let answers = match query_mx(ctx, domain).await {
        Ok(answers) => answers,
        Err(error) => return DomainOutcome::failed(error),
    };
    log::debug!("{domain}: {} MX answer(s)", answers.len());

    let mut outcome = DomainOutcome::default();
    for answer in answers {
        match resolve_exchange(ctx, domain, &answer.exchange).await {
            Ok(ip) => outcome.records.push(ResolvedRecord {
                domain: domain.to_string(),
                preference: answer.preference,
                exchange: answer.exchange,
                ip,
            }),
            Err(error) => outcome.errors.push(error),
        }
    }
    outcome
}

/// MX query with the per-lookup deadline. An empty answer set is an error.
async fn query_mx(ctx: &TaskContext, domain: &str) -> Result<Vec<MxAnswer>, ResolutionError> {
    let result = tokio::time::timeout(
        ctx.lookup_timeout,
        ctx.mx.lookup_mx(domain, ctx.nameserver),
    )
    .await;

    match result {
        // The resolver's own timeout and the deadline report the same way
        Err(_) | Ok(Err(LookupError::Timeout)) => Err(ResolutionError::LookupTimeout {
            target: domain.to_string(),
            stage: LookupStage::Mx,
            timeout: ctx.lookup_timeout,
        }),
        Ok(Err(LookupError::NoRecords)) => Err(ResolutionError::NoMxRecords {
            domain: domain.to_string(),
        }),
        Ok(Err(LookupError::Transport(reason))) => Err(ResolutionError::MxLookupFailed {
            domain: domain.to_string(),
            reason,
        }),
        Ok(Ok(answers)) if answers.is_empty() => Err(ResolutionError::NoMxRecords {
            domain: domain.to_string(),
        }),
        Ok(Ok(mut answers)) => {
            answers.sort();
            Ok(answers)
        }
    }
}

/// First address of `exchange`, with the per-lookup deadline.
async fn resolve_exchange(
    ctx: &TaskContext,
    domain: &str,
    exchange: &str,
) -> Result<IpAddr, ResolutionError> {
    let result =
        tokio::time::timeout(ctx.lookup_timeout, ctx.addresses.lookup_addresses(exchange)).await;

    let failed = |reason: String| ResolutionError::AddressLookupFailed {
        domain: domain.to_string(),
        exchange: exchange.to_string(),
        reason,
    };

    match result {
        Err(_) | Ok(Err(LookupError::Timeout)) => Err(ResolutionError::LookupTimeout {
            target: exchange.to_string(),
            stage: LookupStage::Address,
            timeout: ctx.lookup_timeout,
        }),
        Ok(Err(e)) => Err(failed(e.to_string())),
        Ok(Ok(addresses)) => addresses
            .into_iter()
            .next()
            .ok_or_else(|| failed("no IP addresses found".to_string())),
    }
}
