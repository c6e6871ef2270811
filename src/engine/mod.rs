//! Concurrent resolution engine.
//!
//! [`ResolutionEngine::resolve`] takes a batch of raw domain strings and an
//! optional resolver address, fans out one Tokio task per domain (at most
//! `max_concurrency` running at once), waits for every task, and merges their
//! outcomes into a [`BatchResult`].
//!
//! A failing domain never affects its siblings: validation failures, empty
//! answers, lookup errors, timeouts and even panicking tasks all end up as
//! entries in `BatchResult::errors`.

mod task;

use std::net::Ipv4Addr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{info, warn};

use crate::app::log_progress;
use crate::config::{Config, LOGGING_INTERVAL, MAX_CONCURRENCY_LIMIT};
use crate::dns::{AddressLookup, HickoryLookup, MxLookup};
use crate::error_handling::{ErrorStats, ResolutionError};
use crate::initialization::init_semaphore;
use crate::models::BatchResult;
use crate::validation::parse_ipv4;

use task::{resolve_domain, DomainOutcome, TaskContext};

/// Resolves MX records and mail exchanger addresses for batches of domains.
///
/// The engine holds no per-batch state; every call to
/// [`resolve`](Self::resolve) is independent.
///
/// # Example
///
/// ```no_run
/// use mx_resolve::{Config, ResolutionEngine};
///
/// # #[tokio::main]
/// # async fn main() {
/// let engine = ResolutionEngine::from_config(&Config::default());
/// let result = engine.resolve(&["gmail.com", "aol.com"], "").await;
/// for record in &result.records {
///     println!("{}", mx_resolve::format_record(record));
/// }
/// # }
/// ```
pub struct ResolutionEngine {
    mx: Arc<dyn MxLookup>,
    addresses: Arc<dyn AddressLookup>,
    max_concurrency: usize,
    lookup_timeout: Duration,
}

impl ResolutionEngine {
    /// Creates an engine from explicit lookup capabilities.
    ///
    /// `max_concurrency` is clamped to `1..=MAX_CONCURRENCY_LIMIT`, so an
    /// unvalidated config still yields a usable engine.
    pub fn new(mx: Arc<dyn MxLookup>, addresses: Arc<dyn AddressLookup>, config: &Config) -> Self {
        Self {
            mx,
            addresses,
            max_concurrency: config.max_concurrency.clamp(1, MAX_CONCURRENCY_LIMIT),
            lookup_timeout: config.lookup_timeout(),
        }
    }

    /// Creates an engine whose MX queries and address lookups share one backend.
    pub fn with_backend<B>(backend: Arc<B>, config: &Config) -> Self
    where
        B: MxLookup + AddressLookup + 'static,
    {
        Self::new(backend.clone(), backend, config)
    }

    /// Creates an engine backed by real DNS through `hickory-resolver`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        Self::with_backend(Arc::new(HickoryLookup::new(config.lookup_timeout())), config)
    }

    /// Resolves a batch of domains.
    ///
    /// # Arguments
    ///
    /// * `domains` - Raw domain strings, validated here without normalization
    /// * `resolver_address` - IPv4 address of the DNS server for MX queries, or
    ///   `""` for the default resolver. An invalid address is reported once and
    ///   the batch falls back to the default resolver.
    ///
    /// # Returns
    ///
    /// Every record and every error of the batch, ordered by input position.
    /// Returns only after every task has finished.
    pub async fn resolve<S: AsRef<str>>(&self, domains: &[S], resolver_address: &str) -> BatchResult {
        let start_time = Instant::now();
        let total = domains.len();
        let stats = Arc::new(ErrorStats::new());
        let completed = Arc::new(AtomicUsize::new(0));

        let mut errors = Vec::new();
        let nameserver = select_nameserver(resolver_address, &stats, &mut errors);

        let ctx = Arc::new(TaskContext {
            mx: Arc::clone(&self.mx),
            addresses: Arc::clone(&self.addresses),
            nameserver,
            lookup_timeout: self.lookup_timeout,
            stats: Arc::clone(&stats),
            completed: Arc::clone(&completed),
        });

        let semaphore = init_semaphore(self.max_concurrency);
        let mut tasks = FuturesUnordered::new();

        for (index, domain) in domains.iter().enumerate() {
            let domain = domain.as_ref().to_string();
            let task_domain = domain.clone();
            let ctx = Arc::clone(&ctx);
            let semaphore = Arc::clone(&semaphore);

            log::debug!("Dispatching {domain}");
            let handle = tokio::spawn(async move {
                // Hold permit until task completes. The semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                resolve_domain(&ctx, &task_domain).await
            });
            tasks.push(handle.map(move |joined| (index, domain, joined)));
        }

        let mut outcomes: Vec<(usize, DomainOutcome)> = Vec::with_capacity(total);
        let mut progress = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
        // The first tick completes immediately
        progress.tick().await;

        loop {
            tokio::select! {
                next = tasks.next() => {
                    let Some((index, domain, joined)) = next else {
                        break;
                    };
                    let outcome = match joined {
                        Ok(outcome) => outcome,
                        Err(join_error) => {
                            warn!("Task for {domain} panicked: {join_error}");
                            let error = ResolutionError::WorkerFailed {
                                domain,
                                reason: join_error.to_string(),
                            };
                            stats.increment(error.kind());
                            DomainOutcome::failed(error)
                        }
                    };
                    outcomes.push((index, outcome));
                }
                _ = progress.tick() => {
                    log_progress(start_time, &completed, total);
                }
            }
        }

        // Single writer: merge in input order
        outcomes.sort_by_key(|(index, _)| *index);
        let mut records = Vec::new();
        for (_, outcome) in outcomes {
            records.extend(outcome.records);
            errors.extend(outcome.errors);
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Resolved {} domain{} in {:.2}s: {} record{}, {} error{}",
            total,
            if total == 1 { "" } else { "s" },
            elapsed_seconds,
            records.len(),
            if records.len() == 1 { "" } else { "s" },
            errors.len(),
            if errors.len() == 1 { "" } else { "s" },
        );

        BatchResult {
            records,
            errors,
            domains: total,
            error_counts: stats.snapshot(),
            elapsed_seconds,
        }
    }
}

/// Decides, once per batch, which resolver MX queries go to.
fn select_nameserver(
    resolver_address: &str,
    stats: &ErrorStats,
    errors: &mut Vec<ResolutionError>,
) -> Option<Ipv4Addr> {
    if resolver_address.is_empty() {
        return None;
    }
    match parse_ipv4(resolver_address) {
        Some(ip) => {
            info!("Using DNS server {ip} for MX queries");
            Some(ip)
        }
        None => {
            warn!("Invalid resolver address {resolver_address:?}, falling back to the default resolver");
            let error = ResolutionError::InvalidResolverAddress {
                address: resolver_address.to_string(),
            };
            stats.increment(error.kind());
            errors.push(error);
            None
        }
    }
}

#[cfg(test)]
mod tests;
