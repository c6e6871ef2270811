//! MX record queries.

use hickory_resolver::TokioAsyncResolver;

use super::lookup::{LookupError, MxAnswer};

/// Queries MX (mail exchanger) records for a domain.
///
/// # Arguments
///
/// * `domain` - The domain to query
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// The answers sorted by preference (lower = higher priority), then exchange.
///
/// # Errors
///
/// `LookupError::NoRecords` when the domain has no MX records or does not
/// exist, `LookupError::Timeout` when the resolver gave up waiting, and
/// `LookupError::Transport` for every other resolver failure.
pub async fn lookup_mx_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<MxAnswer>, LookupError> {
    match resolver.mx_lookup(fully_qualified(domain)).await {
        Ok(lookup) => {
            let mut answers: Vec<MxAnswer> = lookup
                .iter()
                .map(|mx| {
                    MxAnswer::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8()))
                })
                .collect();
            answers.sort();
            Ok(answers)
        }
        Err(e) => {
            let err = LookupError::from(e);
            match &err {
                LookupError::NoRecords => log::debug!("No MX records for {domain}"),
                LookupError::Timeout => log::warn!("MX record lookup timed out for {domain}"),
                LookupError::Transport(msg) => {
                    log::warn!("Failed to lookup MX records for {domain}: {msg}");
                }
            }
            Err(err)
        }
    }
}

/// Appends the root dot so the resolver never tries search domains.
pub(crate) fn fully_qualified(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Strips the trailing root dot from an exchange name.
pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_string()
}
