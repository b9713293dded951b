//! Per-cycle bookkeeping and availability aggregation.
//!
//! A [`CycleState`] is built fresh for every cycle and dropped once the cycle
//! has been reported. Aggregation only reads it.

use std::cmp::Ordering;

use url::Url;

use crate::http_probe::prelude::*;

/// Domain used for URLs without an extractable host.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Extract the aggregation domain (`host` or `host:port`) from a URL.
///
/// Never fails: anything without a host segment is attributed to
/// [`UNKNOWN_DOMAIN`].
pub fn extract_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_DOMAIN.to_string();
    };

    match (parsed.host_str(), parsed.port()) {
        (Some(host), _) if host.is_empty() => UNKNOWN_DOMAIN.to_string(),
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => UNKNOWN_DOMAIN.to_string(),
    }
}

/// `round(up / total * 100)` with ties rounded to even, in exact integer
/// arithmetic. `up` is clamped to `total`; an empty domain is 0%.
pub fn availability_percentage(up: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let total = total as u64;
    let scaled = (up as u64).min(total) * 100;
    let (quotient, remainder) = (scaled / total, scaled % total);

    let rounded = match (remainder * 2).cmp(&total) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + (quotient & 1),
    };
    rounded as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UrlStatuses {
    url: String,
    domain: String,
    statuses: Vec<Status>,
}

/// Everything observed during one cycle, in observation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    checks: Vec<(String, usize)>,
    urls: Vec<UrlStatuses>,
}

/// Availability of one domain for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAvailability {
    pub domain: String,
    /// Endpoint checks attributed to the domain.
    pub total: usize,
    /// Distinct URLs whose every recorded status was up.
    pub up: usize,
    pub percentage: u8,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one endpoint check.
    /// Counts a check for the URL's domain and appends `status` to the URL's
    /// status sequence.
    pub fn record(&mut self, url: &str, status: Status) {
        let domain = extract_domain(url);

        match self.checks.iter_mut().find(|(known, _)| *known == domain) {
            Some((_, count)) => *count += 1,
            None => self.checks.push((domain.clone(), 1)),
        }

        match self.urls.iter_mut().find(|entry| entry.url == url) {
            Some(entry) => entry.statuses.push(status),
            None => self.urls.push(UrlStatuses {
                url: url.to_string(),
                domain,
                statuses: vec![status],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Statuses recorded for `url` this cycle, oldest first.
    pub fn statuses(&self, url: &str) -> &[Status] {
        self.urls
            .iter()
            .find(|entry| entry.url == url)
            .map(|entry| entry.statuses.as_slice())
            .unwrap_or_default()
    }

    /// Availability per domain, in order of first occurrence.
    pub fn aggregate(&self) -> Vec<DomainAvailability> {
        self.checks
            .iter()
            .map(|(domain, total)| {
                let up = self
                    .urls
                    .iter()
                    .filter(|entry| entry.domain == *domain)
                    .filter(|entry| entry.statuses.iter().all(Status::is_up))
                    .count();

                DomainAvailability {
                    domain: domain.clone(),
                    total: *total,
                    up,
                    percentage: availability_percentage(up, *total),
                }
            })
            .collect()
    }
}
