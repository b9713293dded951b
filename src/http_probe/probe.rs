use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, Request};

use super::prelude::*;
use super::report;
use crate::config::Endpoint;
use crate::error::Result;

/// Upper bound for a single probe, connect through response headers.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can check an endpoint once.
///
/// Implementations must never fail: every problem is folded into the
/// returned [`ProbeResult`].
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeResult> + Send;
}

/// [`Prober`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new() -> Result<Self> {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pulsebox/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeResult {
        probe_endpoint(&self.client, endpoint).await
    }
}

fn build_request(client: &Client, endpoint: &Endpoint) -> std::result::Result<Request, String> {
    let method = Method::from_bytes(endpoint.method.as_bytes()).map_err(|e| report(&e))?;

    let mut builder = client.request(method, &endpoint.url);
    for (name, value) in &endpoint.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &endpoint.body {
        builder = builder.body(body.clone());
    }

    builder.build().map_err(|e| report(&e))
}

fn unreachable(endpoint: &Endpoint, message: String) -> ProbeResult {
    log::error!("Error checking {}: {}", endpoint.name, message);
    ProbeResult::unreachable(message)
}

/// Issue exactly one request for `endpoint` and classify the outcome.
/// Latency runs from sending the request until the response headers arrive,
/// truncated to whole milliseconds.
pub async fn probe_endpoint(client: &Client, endpoint: &Endpoint) -> ProbeResult {
    let request = match build_request(client, endpoint) {
        Ok(request) => request,
        Err(message) => return unreachable(endpoint, message),
    };

    let start = Instant::now();
    match client.execute(request).await {
        Ok(response) => {
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            let status_code = response.status().as_u16();
            log::debug!(
                "{} {} answered {} in {}ms",
                endpoint.method,
                endpoint.url,
                status_code,
                latency_ms
            );
            ProbeResult::responded(status_code, latency_ms)
        }
        Err(e) => unreachable(endpoint, report(&e)),
    }
}
