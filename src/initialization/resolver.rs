//! DNS resolver initialization.
//!
//! This module builds the hickory resolvers used for MX queries and address
//! lookups, with timeouts aligned to the per-lookup deadline.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_PORT};

/// Resolver options shared by every resolver this crate builds.
///
/// Caching is disabled so each batch sees fresh answers. `ndots` is 0 so a
/// relative name is tried as-is first; search domains are kept out by the
/// config built in [`init_resolver`] and by querying fully-qualified names.
pub fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts.cache_size = 0;
    opts
}

/// Initializes the default resolver.
///
/// Uses the nameservers of the system configuration (`/etc/resolv.conf` or
/// the platform equivalent) without its `domain`/`search` list. If it cannot
/// be read, falls back to hickory's default configuration (Google Public DNS)
/// and logs a warning.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout handed to hickory
pub fn init_resolver(timeout: Duration) -> TokioAsyncResolver {
    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _system_opts)) => without_search_domains(&config),
        Err(e) => {
            log::warn!("Failed to read system DNS configuration, using defaults: {e}");
            ResolverConfig::default()
        }
    };
    TokioAsyncResolver::tokio(config, resolver_opts(timeout))
}

/// Same nameservers, no local domain and no search list.
fn without_search_domains(config: &ResolverConfig) -> ResolverConfig {
    let group = NameServerConfigGroup::from(config.name_servers().to_vec());
    ResolverConfig::from_parts(None, Vec::new(), group)
}

/// Initializes a resolver that only talks to `nameserver` on port 53
/// (UDP, with TCP fallback for truncated answers).
///
/// # Arguments
///
/// * `nameserver` - DNS server address given by the caller
/// * `timeout` - Per-query timeout handed to hickory
pub fn init_pinned_resolver(nameserver: Ipv4Addr, timeout: Duration) -> TokioAsyncResolver {
    let group = NameServerConfigGroup::from_ips_clear(&[IpAddr::V4(nameserver)], DNS_PORT, true);
    let config = ResolverConfig::from_parts(None, Vec::new(), group);
    TokioAsyncResolver::tokio(config, resolver_opts(timeout))
}
