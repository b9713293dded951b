use std::fmt;

/// Responses at or above this latency count as down even when successful.
pub const LATENCY_THRESHOLD_MS: u64 = 500;

/// Classified outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Up,
    /// 2xx, but slower than [`LATENCY_THRESHOLD_MS`].
    DownLatency,
    DownBadRequest,
    DownForbidden,
    DownNotFound,
    DownServerError,
    /// Any other status code.
    DownHttp(u16),
    /// The request never produced a response. Carries the transport error.
    DownError(String),
}

impl Status {
    /// Classify a response by status code and latency.
    ///
    /// Precedence: successful codes are judged on latency first, then the
    /// well known client/server errors, then everything else.
    pub fn classify(status_code: u16, latency_ms: u64) -> Self {
        match status_code {
            200..=299 if latency_ms < LATENCY_THRESHOLD_MS => Status::Up,
            200..=299 => Status::DownLatency,
            400 => Status::DownBadRequest,
            403 => Status::DownForbidden,
            404 => Status::DownNotFound,
            500 => Status::DownServerError,
            code => Status::DownHttp(code),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Status::Up)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::DownLatency => write!(
                f,
                "DOWN (response latency is not less than {} ms)",
                LATENCY_THRESHOLD_MS
            ),
            Status::DownBadRequest => write!(f, "DOWN (HTTP 400 Bad Request)"),
            Status::DownForbidden => write!(f, "DOWN (HTTP 403 Forbidden)"),
            Status::DownNotFound => write!(f, "DOWN (HTTP 404 Not Found)"),
            Status::DownServerError => write!(f, "DOWN (HTTP 500 Internal Server Error)"),
            Status::DownHttp(code) => write!(f, "DOWN (HTTP {})", code),
            // the message goes to the diagnostic stream, not the report
            Status::DownError(_) => write!(f, "DOWN (Error)"),
        }
    }
}
