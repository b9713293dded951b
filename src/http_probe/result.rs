use super::status::Status;

/// Outcome of one probe. Lives only for the cycle that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub status_code: Option<u16>,
    pub latency_ms: Option<u64>,
    pub status: Status,
}

impl ProbeResult {
    /// The endpoint answered, classify what it said.
    pub fn responded(status_code: u16, latency_ms: u64) -> Self {
        Self {
            status_code: Some(status_code),
            latency_ms: Some(latency_ms),
            status: Status::classify(status_code, latency_ms),
        }
    }

    /// The endpoint could not be reached at all.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            latency_ms: None,
            status: Status::DownError(message.into()),
        }
    }
}
