use std::fmt::Write;

use chrono::{Local, NaiveDateTime};
use unicode_truncate::UnicodeTruncateStr;

use super::state::DomainAvailability;
use crate::http_probe::prelude::*;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Probe outcome for one configured endpoint, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReport {
    pub name: String,
    pub result: ProbeResult,
}

/// Render the log block for a completed cycle, stamped with the local time.
pub fn render(
    cycle: u64,
    elapsed_secs: u64,
    results: &[EndpointReport],
    availability: &[DomainAvailability],
) -> String {
    render_at(Local::now().naive_local(), cycle, elapsed_secs, results, availability)
}

/// Render the log block for a completed cycle.
///
/// The block starts with an empty line so consecutive cycles are visually
/// separated in the log file, and always ends with a newline.
pub fn render_at(
    timestamp: NaiveDateTime,
    cycle: u64,
    elapsed_secs: u64,
    results: &[EndpointReport],
    availability: &[DomainAvailability],
) -> String {
    let mut block = String::new();
    let _ = writeln!(block);
    let _ = writeln!(block, "{}", timestamp.format(TIMESTAMP_FORMAT));
    let _ = writeln!(
        block,
        "Test cycle #{} begins at time = {} seconds:",
        cycle, elapsed_secs
    );

    for report in results {
        block.push_str(&endpoint_line(report));
        block.push('\n');
    }

    for domain in availability {
        let _ = writeln!(block, "{}", availability_line(&domain.domain, domain.percentage));
    }

    block
}

fn endpoint_line(report: &EndpointReport) -> String {
    let ProbeResult {
        status_code,
        latency_ms,
        status,
    } = &report.result;

    match (status_code, latency_ms) {
        (Some(code), Some(latency)) => {
            // slow responses put the latency on its own line
            let separator = match status {
                Status::DownLatency => "\n",
                _ => " ",
            };
            format!(
                "Endpoint with name {} has HTTP response code {} and{}response latency {} ms => {}",
                report.name, code, separator, latency, status
            )
        }
        _ => format!(
            "Endpoint with name {} could not be reached => {}",
            report.name, status
        ),
    }
}

fn availability_line(domain: &str, percentage: u8) -> String {
    format!("{} has {}% availability percentage", domain, percentage)
}

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// Availability lines for the operator console, with the domain column
/// padded (or truncated) to `width`.
pub fn operator_lines(availability: &[DomainAvailability], width: usize) -> Vec<String> {
    availability
        .iter()
        .map(|domain| availability_line(&to_fixed_width(&domain.domain, width), domain.percentage))
        .collect()
}
