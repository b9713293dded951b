//! pulsebox
//!
//! Probes a fixed list of HTTP endpoints on a drift-corrected interval,
//! classifies every response, and appends a per-cycle availability report
//! (grouped by domain) to a log file.

pub mod config;
pub mod cycle;
pub mod error;
pub mod http_probe;

pub use config::{AppConfig, Cli, Endpoint};
pub use cycle::{FileSink, Scheduler};
pub use error::{MonitorError, Result};
pub use http_probe::prelude::{HttpProber, ProbeResult, Prober, Status};
