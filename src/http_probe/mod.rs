pub mod probe;
pub mod result;
pub mod status;

pub mod prelude {
    pub use super::probe::{HttpProber, PROBE_TIMEOUT, Prober, probe_endpoint};
    pub use super::result::ProbeResult;
    pub use super::status::{LATENCY_THRESHOLD_MS, Status};
}

use std::fmt::Write;

/// Flatten an error and its sources into a single line.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
