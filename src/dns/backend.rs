//! hickory-resolver implementation of the lookup capabilities.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use super::lookup::{AddressLookup, LookupError, MxAnswer, MxLookup};
use super::records::lookup_mx_records;
use super::resolution::resolve_host_addresses;
use crate::initialization::{init_pinned_resolver, init_resolver};

/// Real DNS backend.
///
/// MX queries go to the default resolver or to the requested nameserver.
/// Address lookups always use the default resolver. One resolver is built per
/// distinct nameserver and reused across batches.
pub struct HickoryLookup {
    default: TokioAsyncResolver,
    timeout: Duration,
    pinned: Mutex<HashMap<Ipv4Addr, TokioAsyncResolver>>,
}

impl HickoryLookup {
    /// Creates a backend whose resolvers use `timeout` per query.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(timeout: Duration) -> Self {
        Self {
            default: init_resolver(timeout),
            timeout,
            pinned: Mutex::new(HashMap::new()),
        }
    }

    fn resolver_for(&self, nameserver: Option<Ipv4Addr>) -> TokioAsyncResolver {
        let Some(ip) = nameserver else {
            return self.default.clone();
        };
        // The map holds no invariant a panicking writer could break.
        let mut pinned = self.pinned.lock().unwrap_or_else(PoisonError::into_inner);
        pinned
            .entry(ip)
            .or_insert_with(|| {
                log::debug!("Creating resolver for nameserver {ip}");
                init_pinned_resolver(ip, self.timeout)
            })
            .clone()
    }
}

#[async_trait]
impl MxLookup for HickoryLookup {
    async fn lookup_mx(
        &self,
        domain: &str,
        nameserver: Option<Ipv4Addr>,
    ) -> Result<Vec<MxAnswer>, LookupError> {
        let resolver = self.resolver_for(nameserver);
        lookup_mx_records(domain, &resolver).await
    }
}

#[async_trait]
impl AddressLookup for HickoryLookup {
    async fn lookup_addresses(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        resolve_host_addresses(host, &self.default).await
    }
}
