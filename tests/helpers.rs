// Shared test helpers: a deterministic DNS backend for engine and run tests.
//
// Integration tests never touch the network; every lookup goes through StubDns.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

use async_trait::async_trait;
use mx_resolve::{AddressLookup, LookupError, MxAnswer, MxLookup};

/// Canned MX answers and addresses keyed by name.
///
/// Domains without MX answers behave like NXDOMAIN. Exchanges without
/// addresses resolve to an empty list.
#[derive(Default)]
pub struct StubDns {
    mx: HashMap<String, Vec<MxAnswer>>,
    addresses: HashMap<String, Vec<IpAddr>>,
    /// Nameserver passed to every MX query, in call order
    pub nameservers: Mutex<Vec<Option<Ipv4Addr>>>,
}

impl StubDns {
    /// Adds an MX answer for `domain` and an address for its exchange.
    pub fn with_record(mut self, domain: &str, preference: u16, exchange: &str, ip: &str) -> Self {
        self.mx
            .entry(domain.to_string())
            .or_default()
            .push(MxAnswer::new(preference, exchange));
        self.addresses
            .entry(exchange.to_string())
            .or_default()
            .push(ip.parse().expect("test IP must parse"));
        self
    }
}

#[async_trait]
impl MxLookup for StubDns {
    async fn lookup_mx(
        &self,
        domain: &str,
        nameserver: Option<Ipv4Addr>,
    ) -> Result<Vec<MxAnswer>, LookupError> {
        self.nameservers.lock().unwrap().push(nameserver);
        self.mx.get(domain).cloned().ok_or(LookupError::NoRecords)
    }
}

#[async_trait]
impl AddressLookup for StubDns {
    async fn lookup_addresses(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        Ok(self.addresses.get(host).cloned().unwrap_or_default())
    }
}

/// The three mail providers used throughout the tests.
#[allow(dead_code)] // Used by other test files
pub fn mail_providers() -> StubDns {
    StubDns::default()
        .with_record("gmail.com", 5, "gmail-smtp-in.l.google.com", "142.250.27.26")
        .with_record("gmail.com", 10, "alt1.gmail-smtp-in.l.google.com", "142.250.153.26")
        .with_record("aol.com", 10, "mx-aol.mail.gm0.yahoodns.net", "67.195.204.72")
        .with_record("hotmail.com", 2, "hotmail-com.olc.protection.outlook.com", "52.101.68.13")
}
