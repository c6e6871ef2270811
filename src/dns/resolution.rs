//! IP address resolution of mail exchanger hostnames.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;

use super::lookup::LookupError;
use super::records::fully_qualified;

/// Resolves a hostname to its IP addresses using DNS.
///
/// # Arguments
///
/// * `host` - The hostname to resolve
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// Every address in resolver order. May be empty.
///
/// # Errors
///
/// Returns an error if DNS resolution fails.
pub async fn resolve_host_addresses(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<IpAddr>, LookupError> {
    let response = resolver.lookup_ip(fully_qualified(host)).await.map_err(|e| {
        log::debug!("Address lookup failed for {host}: {e}");
        LookupError::from(e)
    })?;
    Ok(response.iter().collect())
}
