//! Syntactic validation of domain names and resolver addresses.
//!
//! Both checks are pure pattern matches. No normalization (lower-casing,
//! trimming, IDNA conversion) happens here; callers that want it must apply it
//! before validating.

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Domain grammar: one label of 1-63 characters from `[a-z0-9_-]` that starts
/// with a letter or digit (optionally `xn--` prefixed), a dot, then either a
/// single label or `label.tld` with an alphabetic tld of at least two letters.
const DOMAIN_PATTERN: &str = r"^(xn--)?[a-z0-9][a-z0-9_\-]{0,61}[a-z0-9]?\.(xn--)?([a-z0-9\-]{1,61}|[a-z0-9\-]{1,30}\.[a-z]{2,})$";

/// Dotted-quad IPv4, 0-255 per octet. Leading zeros are accepted.
const IPV4_PATTERN: &str = r"^(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

/// Helper function to safely compile a regex pattern, panicking with a detailed error message
/// if compilation fails. Used for static regex patterns that are compile-time constants.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DOMAIN_PATTERN, "DOMAIN_RE"));
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(IPV4_PATTERN, "IPV4_RE"));

/// Returns `true` if `domain` matches the domain-name grammar.
///
/// # Examples
///
/// ```
/// use mx_resolve::is_valid_domain;
///
/// assert!(is_valid_domain("google.com"));
/// assert!(!is_valid_domain("google"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Returns `true` if `address` is a dotted-quad IPv4 address.
///
/// IPv6, hostnames and CIDR notation are rejected.
///
/// # Examples
///
/// ```
/// use mx_resolve::is_valid_ipv4;
///
/// assert!(is_valid_ipv4("8.8.8.8"));
/// assert!(!is_valid_ipv4("123"));
/// ```
pub fn is_valid_ipv4(address: &str) -> bool {
    IPV4_RE.is_match(address)
}

/// Parses a resolver address that passed [`is_valid_ipv4`].
///
/// Octets are parsed individually because the grammar accepts leading zeros
/// (`008.008.008.008`), which `Ipv4Addr::from_str` rejects.
pub fn parse_ipv4(address: &str) -> Option<Ipv4Addr> {
    if !is_valid_ipv4(address) {
        return None;
    }
    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(address.split('.')) {
        *slot = part.parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}
