//! Engine tests with deterministic stub backends.

use super::*;
use crate::dns::{LookupError, MxAnswer};
use crate::error_handling::{ErrorKind, LookupStage};
use crate::models::ResolvedRecord;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

/// Stub DNS backend.
///
/// Domains without a configured MX answer return `NoRecords`. Exchanges
/// without configured addresses resolve to an empty list.
#[derive(Default)]
struct StubDns {
    mx: HashMap<String, Result<Vec<MxAnswer>, LookupError>>,
    addresses: HashMap<String, Vec<IpAddr>>,
    address_errors: HashMap<String, LookupError>,
    mx_delays: HashMap<String, Duration>,
    address_delays: HashMap<String, Duration>,
    panic_on: Option<String>,
    nameservers_seen: Mutex<Vec<Option<Ipv4Addr>>>,
    mx_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubDns {
    fn with_mx(mut self, domain: &str, answers: &[(u16, &str)]) -> Self {
        let answers = answers
            .iter()
            .map(|(preference, exchange)| MxAnswer::new(*preference, *exchange))
            .collect();
        self.mx.insert(domain.to_string(), Ok(answers));
        self
    }

    fn with_mx_error(mut self, domain: &str, error: LookupError) -> Self {
        self.mx.insert(domain.to_string(), Err(error));
        self
    }

    fn with_address(mut self, host: &str, ip: &str) -> Self {
        self.addresses
            .entry(host.to_string())
            .or_default()
            .push(ip.parse().unwrap());
        self
    }

    fn with_address_error(mut self, host: &str, error: LookupError) -> Self {
        self.address_errors.insert(host.to_string(), error);
        self
    }

    fn with_address_delay(mut self, host: &str, delay: Duration) -> Self {
        self.address_delays.insert(host.to_string(), delay);
        self
    }

    fn with_delay(mut self, domain: &str, delay: Duration) -> Self {
        self.mx_delays.insert(domain.to_string(), delay);
        self
    }

    fn panicking_on(mut self, domain: &str) -> Self {
        self.panic_on = Some(domain.to_string());
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
        self.mx_calls.fetch_add(1, Ordering::SeqCst);
        self.nameservers_seen.lock().unwrap().push(nameserver);
        if self.panic_on.as_deref() == Some(domain) {
            panic!("stub panic for {domain}");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self
            .mx_delays
            .get(domain)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.mx
            .get(domain)
            .cloned()
            .unwrap_or(Err(LookupError::NoRecords))
    }
}

#[async_trait]
impl AddressLookup for StubDns {
    async fn lookup_addresses(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        if let Some(delay) = self.address_delays.get(host) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = self.address_errors.get(host) {
            return Err(error.clone());
        }
        Ok(self.addresses.get(host).cloned().unwrap_or_default())
    }
}

fn mail_stub() -> StubDns {
    StubDns::default()
        .with_mx(
            "gmail.com",
            &[
                (40, "alt4.gmail-smtp-in.l.google.com"),
                (5, "gmail-smtp-in.l.google.com"),
                (10, "alt1.gmail-smtp-in.l.google.com"),
            ],
        )
        .with_mx("aol.com", &[(10, "mx-aol.mail.gm0.yahoodns.net")])
        .with_mx(
            "hotmail.com",
            &[(2, "hotmail-com.olc.protection.outlook.com")],
        )
        .with_address("gmail-smtp-in.l.google.com", "142.250.27.26")
        .with_address("alt1.gmail-smtp-in.l.google.com", "142.250.153.26")
        .with_address("alt4.gmail-smtp-in.l.google.com", "142.250.150.26")
        .with_address("mx-aol.mail.gm0.yahoodns.net", "67.195.204.72")
        .with_address("hotmail-com.olc.protection.outlook.com", "52.101.68.13")
        .with_address("hotmail-com.olc.protection.outlook.com", "52.101.68.14")
}

fn engine_for(stub: Arc<StubDns>, config: &Config) -> ResolutionEngine {
    ResolutionEngine::with_backend(stub, config)
}

fn default_engine(stub: Arc<StubDns>) -> ResolutionEngine {
    engine_for(stub, &Config::default())
}

#[tokio::test]
async fn test_resolve_real_domains_yields_one_record_per_answer() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(Arc::clone(&stub));

    let result = engine
        .resolve(&["gmail.com", "aol.com", "hotmail.com"], "")
        .await;

    assert_eq!(result.records.len(), 5);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert!(result.is_resolved());
    assert_eq!(result.domains, 3);
    assert_eq!(stub.mx_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_records_follow_input_order_then_preference() {
    // gmail.com answers last, but its records still come first
    let stub = Arc::new(mail_stub().with_delay("gmail.com", Duration::from_millis(80)));
    let engine = default_engine(stub);

    let result = engine.resolve(&["gmail.com", "aol.com"], "").await;

    let summary: Vec<(&str, u16)> = result
        .records
        .iter()
        .map(|r| (r.domain.as_str(), r.preference))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("gmail.com", 5),
            ("gmail.com", 10),
            ("gmail.com", 40),
            ("aol.com", 10)
        ]
    );
}

#[tokio::test]
async fn test_first_address_is_used() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(stub);

    let result = engine.resolve(&["hotmail.com"], "").await;

    assert_eq!(
        result.records,
        vec![ResolvedRecord {
            domain: "hotmail.com".to_string(),
            preference: 2,
            exchange: "hotmail-com.olc.protection.outlook.com".to_string(),
            ip: "52.101.68.13".parse().unwrap(),
        }]
    );
}

#[tokio::test]
async fn test_resolve_fake_domains_yields_invalid_domain_errors() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(Arc::clone(&stub));

    let result = engine.resolve(&["gmail", "aol", "hotmail"], "").await;

    assert!(result.records.is_empty());
    assert_eq!(result.errors.len(), 3);
    assert!(result
        .errors
        .iter()
        .all(|e| e.kind() == ErrorKind::InvalidDomain));
    assert_eq!(result.error_count(ErrorKind::InvalidDomain), 3);
    // Invalid domains never reach the resolver
    assert_eq!(stub.mx_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_resolver_address_falls_back_to_default() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(Arc::clone(&stub));

    let result = engine.resolve(&["gmail.com"], "123").await;

    assert_eq!(
        result.errors,
        vec![ResolutionError::InvalidResolverAddress {
            address: "123".to_string()
        }]
    );
    assert_eq!(result.records.len(), 3, "lookup still runs on the default resolver");
    assert_eq!(*stub.nameservers_seen.lock().unwrap(), vec![None]);
}

#[tokio::test]
async fn test_invalid_resolver_address_reported_once_per_batch() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(stub);

    let result = engine
        .resolve(&["gmail.com", "aol.com", "hotmail.com"], "not-an-ip")
        .await;

    assert_eq!(result.error_count(ErrorKind::InvalidResolverAddress), 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind(), ErrorKind::InvalidResolverAddress);
}

#[tokio::test]
async fn test_valid_resolver_address_is_passed_to_every_query() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(Arc::clone(&stub));

    let result = engine.resolve(&["gmail.com", "aol.com"], "8.8.8.8").await;

    assert!(result.errors.is_empty());
    let seen = stub.nameservers_seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|ns| *ns == Some(Ipv4Addr::new(8, 8, 8, 8))));
}

#[tokio::test]
async fn test_mixed_batch_isolation() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(stub);

    let domains = [
        "gmail",
        "gmail.com",
        "-bad.com",
        "aol.com",
        "Hotmail.com",
        "hotmail.com",
    ];
    let result = engine.resolve(&domains, "").await;

    assert_eq!(result.errors.len(), 3, "errors: {:?}", result.errors);
    assert_eq!(result.error_count(ErrorKind::InvalidDomain), 3);
    let resolved: HashSet<&str> = result.records.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(
        resolved,
        HashSet::from(["gmail.com", "aol.com", "hotmail.com"])
    );
    let failed: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        failed,
        vec![
            "\"gmail\" is not a valid domain and will be ignored",
            "\"-bad.com\" is not a valid domain and will be ignored",
            "\"Hotmail.com\" is not a valid domain and will be ignored",
        ]
    );
}

#[tokio::test]
async fn test_empty_mx_answer_is_unable_to_resolve() {
    let stub = Arc::new(StubDns::default().with_mx("example.com", &[]));
    let engine = default_engine(stub);

    let result = engine.resolve(&["example.com", "nothing.org"], "").await;

    assert!(result.records.is_empty());
    assert_eq!(
        result.errors,
        vec![
            ResolutionError::NoMxRecords {
                domain: "example.com".to_string()
            },
            ResolutionError::NoMxRecords {
                domain: "nothing.org".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_transport_failure_is_distinct_from_empty_answer() {
    let stub = Arc::new(
        StubDns::default()
            .with_mx_error("example.com", LookupError::Transport("connection refused".into())),
    );
    let engine = default_engine(stub);

    let result = engine.resolve(&["example.com"], "").await;

    assert_eq!(
        result.errors,
        vec![ResolutionError::MxLookupFailed {
            domain: "example.com".to_string(),
            reason: "connection refused".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_unresolvable_exchange_is_a_per_answer_error() {
    let stub = Arc::new(
        StubDns::default()
            .with_mx(
                "example.com",
                &[(10, "mx1.example.com"), (20, "mx2.example.com")],
            )
            .with_address("mx1.example.com", "192.0.2.10"),
    );
    let engine = default_engine(stub);

    let result = engine.resolve(&["example.com"], "").await;

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].exchange, "mx1.example.com");
    assert_eq!(
        result.errors,
        vec![ResolutionError::AddressLookupFailed {
            domain: "example.com".to_string(),
            exchange: "mx2.example.com".to_string(),
            reason: "no IP addresses found".to_string(),
        }]
    );
}

fn two_exchange_stub() -> StubDns {
    StubDns::default()
        .with_mx(
            "example.com",
            &[(10, "mx1.example.com"), (20, "mx2.example.com")],
        )
        .with_address("mx1.example.com", "192.0.2.10")
        .with_address("mx2.example.com", "192.0.2.20")
}

#[tokio::test]
async fn test_failing_exchange_keeps_resolver_text_and_sibling_records() {
    let stub = Arc::new(two_exchange_stub().with_address_error(
        "mx1.example.com",
        LookupError::Transport("connection refused".into()),
    ));
    let engine = default_engine(stub);

    let result = engine.resolve(&["example.com"], "").await;

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].exchange, "mx2.example.com");
    assert_eq!(
        result.errors,
        vec![ResolutionError::AddressLookupFailed {
            domain: "example.com".to_string(),
            exchange: "mx1.example.com".to_string(),
            reason: "connection refused".to_string(),
        }]
    );
    assert_eq!(result.error_count(ErrorKind::AddressLookupFailed), 1);
}

#[tokio::test]
async fn test_slow_exchange_times_out_at_address_stage() {
    let stub = Arc::new(
        two_exchange_stub().with_address_delay("mx2.example.com", Duration::from_secs(30)),
    );
    let config = Config {
        timeout_seconds: 1,
        ..Default::default()
    };
    let engine = engine_for(stub, &config);

    let started = Instant::now();
    let result = engine.resolve(&["example.com"], "").await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].exchange, "mx1.example.com");
    assert_eq!(
        result.errors,
        vec![ResolutionError::LookupTimeout {
            target: "mx2.example.com".to_string(),
            stage: LookupStage::Address,
            timeout: Duration::from_secs(1),
        }]
    );
}

#[tokio::test]
async fn test_resolver_timeouts_report_as_lookup_timeout() {
    let stub = Arc::new(
        two_exchange_stub()
            .with_mx_error("slow.org", LookupError::Timeout)
            .with_address_error("mx1.example.com", LookupError::Timeout),
    );
    let engine = default_engine(stub);

    let result = engine.resolve(&["slow.org", "example.com"], "").await;

    let timeout = Config::default().lookup_timeout();
    assert_eq!(
        result.errors,
        vec![
            ResolutionError::LookupTimeout {
                target: "slow.org".to_string(),
                stage: LookupStage::Mx,
                timeout,
            },
            ResolutionError::LookupTimeout {
                target: "mx1.example.com".to_string(),
                stage: LookupStage::Address,
                timeout,
            },
        ]
    );
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.error_count(ErrorKind::LookupTimeout), 2);
}

#[tokio::test]
async fn test_oversized_concurrency_is_clamped() {
    let stub = Arc::new(mail_stub());
    let config = Config {
        max_concurrency: usize::MAX,
        ..Default::default()
    };
    let engine = engine_for(stub, &config);
    assert_eq!(engine.max_concurrency, crate::config::MAX_CONCURRENCY_LIMIT);

    let result = engine.resolve(&["aol.com"], "").await;
    assert_eq!(result.records.len(), 1);

    let zero = engine_for(Arc::new(mail_stub()), &Config {
        max_concurrency: 0,
        ..Default::default()
    });
    assert_eq!(zero.max_concurrency, 1);
}

#[tokio::test]
async fn test_slow_mx_lookup_times_out_without_blocking_siblings() {
    let stub = Arc::new(mail_stub().with_delay("gmail.com", Duration::from_secs(30)));
    let config = Config {
        timeout_seconds: 1,
        ..Default::default()
    };
    let engine = engine_for(stub, &config);

    let started = Instant::now();
    let result = engine.resolve(&["gmail.com", "aol.com"], "").await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].domain, "aol.com");
    assert_eq!(
        result.errors,
        vec![ResolutionError::LookupTimeout {
            target: "gmail.com".to_string(),
            stage: LookupStage::Mx,
            timeout: Duration::from_secs(1),
        }]
    );
}

#[tokio::test]
async fn test_panicking_task_is_isolated() {
    let stub = Arc::new(mail_stub().panicking_on("aol.com"));
    let engine = default_engine(stub);

    let result = engine
        .resolve(&["gmail.com", "aol.com", "hotmail.com"], "")
        .await;

    assert_eq!(result.records.len(), 4);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind(), ErrorKind::WorkerFailed);
    assert_eq!(result.error_count(ErrorKind::WorkerFailed), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_is_capped() {
    let mut stub = StubDns::default();
    let mut domains = Vec::new();
    for i in 0..12 {
        let domain = format!("domain{i}.com");
        stub = stub
            .with_mx(&domain, &[(10, "mx.example.net")])
            .with_delay(&domain, Duration::from_millis(30));
        domains.push(domain);
    }
    let stub = Arc::new(stub.with_address("mx.example.net", "192.0.2.1"));
    let config = Config {
        max_concurrency: 3,
        ..Default::default()
    };
    let engine = engine_for(Arc::clone(&stub), &config);

    let result = engine.resolve(&domains, "").await;

    assert_eq!(result.records.len(), 12);
    let peak = stub.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight {peak} exceeded the cap");
    assert!(peak >= 1);
}

#[tokio::test]
async fn test_empty_batch() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(stub);

    let domains: [&str; 0] = [];
    let result = engine.resolve(&domains, "").await;

    assert!(result.records.is_empty());
    assert!(result.errors.is_empty());
    assert!(!result.is_resolved());
    assert_eq!(result.domains, 0);
}

#[tokio::test]
async fn test_repeated_batches_are_identical() {
    let stub = Arc::new(mail_stub());
    let engine = default_engine(stub);
    let domains = ["hotmail.com", "gmail", "gmail.com", "aol.com"];

    let first = engine.resolve(&domains, "").await;
    let second = engine.resolve(&domains, "").await;

    assert_eq!(first.records, second.records);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.error_counts, second.error_counts);
}

#[test]
fn test_select_nameserver() {
    let stats = ErrorStats::new();
    let mut errors = Vec::new();

    assert_eq!(select_nameserver("", &stats, &mut errors), None);
    assert_eq!(
        select_nameserver("1.1.1.1", &stats, &mut errors),
        Some(Ipv4Addr::new(1, 1, 1, 1))
    );
    assert!(errors.is_empty());

    assert_eq!(select_nameserver("::1", &stats, &mut errors), None);
    assert_eq!(errors.len(), 1);
    assert_eq!(stats.get(ErrorKind::InvalidResolverAddress), 1);
}
