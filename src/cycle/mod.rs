//! One polling cycle: probe, aggregate, report, and the loop that drives it.

pub mod report;
pub mod scheduler;
pub mod sink;
pub mod state;

pub use report::{EndpointReport, render};
pub use scheduler::{CycleOutcome, DEFAULT_INTERVAL, Scheduler, delay_before_cycle};
pub use sink::{FileSink, LogSink};
pub use state::{CycleState, DomainAvailability, UNKNOWN_DOMAIN, extract_domain};
