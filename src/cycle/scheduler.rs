//! Drift-correcting cycle scheduler.
//!
//! Cycle `n` is due `interval * n` after the scheduler starts. Time spent
//! probing is absorbed by a shorter wait; a cycle that overruns makes the next
//! one start immediately. Cycles never overlap.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::{Instant, sleep};

use super::report::{EndpointReport, operator_lines, render};
use super::sink::LogSink;
use super::state::{CycleState, DomainAvailability};
use crate::config::Endpoint;
use crate::error::Result;
use crate::http_probe::prelude::*;

/// Default time between the start of two cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);

const DEFAULT_DOMAIN_WIDTH: usize = 10;

/// Offset from the scheduler start at which cycle `cycle` (1-indexed) is due.
pub fn cycle_offset(cycle: u64, interval: Duration) -> Duration {
    interval.saturating_mul(u32::try_from(cycle).unwrap_or(u32::MAX))
}

/// How long to wait before cycle `cycle`, given the time already elapsed
/// since the scheduler started. `None` means start right away.
pub fn delay_before_cycle(cycle: u64, interval: Duration, elapsed: Duration) -> Option<Duration> {
    cycle_offset(cycle, interval)
        .checked_sub(elapsed)
        .filter(|delay| !delay.is_zero())
}

/// Everything a finished cycle produced.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub cycle: u64,
    pub results: Vec<EndpointReport>,
    pub availability: Vec<DomainAvailability>,
    pub report: String,
}

pub struct Scheduler<P, S> {
    prober: Arc<P>,
    sink: S,
    endpoints: Vec<Endpoint>,
    interval: Duration,
    domain_width: usize,
}

impl<P: Prober, S: LogSink> Scheduler<P, S> {
    pub fn new(prober: P, sink: S, endpoints: Vec<Endpoint>, interval: Duration) -> Self {
        Self {
            prober: Arc::new(prober),
            sink,
            endpoints,
            interval,
            domain_width: DEFAULT_DOMAIN_WIDTH,
        }
    }

    /// Column width of the domain in the operator output.
    pub fn with_domain_width(mut self, width: usize) -> Self {
        self.domain_width = width;
        self
    }

    /// Run cycles until `keep_running` returns false.
    ///
    /// `keep_running` is asked before every cycle with the number of the cycle
    /// about to be scheduled. Returns the number of completed cycles. Only a
    /// failing log sink stops the loop early.
    pub async fn run<F>(&self, mut keep_running: F) -> Result<u64>
    where
        F: FnMut(u64) -> bool,
    {
        let start = Instant::now();
        let mut cycle = 1;

        while keep_running(cycle) {
            let elapsed = start.elapsed();

            match delay_before_cycle(cycle, self.interval, elapsed) {
                Some(delay) => {
                    debug!("Cycle #{} due in {}ms", cycle, delay.as_millis());
                    sleep(delay).await;
                }
                None => {
                    let overrun = elapsed.saturating_sub(cycle_offset(cycle, self.interval));
                    warn!(
                        "Cycle #{} is {}ms behind schedule, starting immediately",
                        cycle,
                        overrun.as_millis()
                    );
                }
            }

            self.run_cycle(cycle, elapsed).await?;
            cycle += 1;
        }

        Ok(cycle - 1)
    }

    /// Probe every endpoint once, aggregate, and report.
    /// `elapsed` is the time since start that is printed in the report header.
    pub async fn run_cycle(&self, cycle: u64, elapsed: Duration) -> Result<CycleOutcome> {
        let started = Instant::now();
        let probed = self.probe_all().await;

        let mut state = CycleState::new();
        let mut results = Vec::with_capacity(probed.len());
        for (endpoint, result) in self.endpoints.iter().zip(probed) {
            state.record(&endpoint.url, result.status.clone());
            results.push(EndpointReport {
                name: endpoint.name.clone(),
                result,
            });
        }

        let availability = state.aggregate();
        let report = render(cycle, elapsed.as_secs(), &results, &availability);
        self.sink.append(&report).await?;

        for line in operator_lines(&availability, self.domain_width) {
            println!("{line}");
        }

        let up = results.iter().filter(|r| r.result.status.is_up()).count();
        info!(
            "Cycle #{} finished in {}ms: {}/{} endpoints up",
            cycle,
            started.elapsed().as_millis(),
            up,
            results.len()
        );

        Ok(CycleOutcome {
            cycle,
            results,
            availability,
            report,
        })
    }

    // All probes run concurrently; results come back in configuration order.
    async fn probe_all(&self) -> Vec<ProbeResult> {
        let handles: Vec<_> = self
            .endpoints
            .iter()
            .cloned()
            .map(|endpoint| {
                let prober = Arc::clone(&self.prober);
                tokio::spawn(async move { prober.probe(&endpoint).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (endpoint, handle) in self.endpoints.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Error checking {}: probe task failed: {}", endpoint.name, e);
                    ProbeResult::unreachable(format!("probe task failed: {e}"))
                }
            };
            results.push(result);
        }
        results
    }
}
