//! Error types for pulsebox.
//!
//! Only process-level failures live here. Per-endpoint failures never become
//! a `MonitorError`; they are classified into a `Status` instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Reading the endpoint file or appending to the log file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The endpoint file is not valid YAML (or JSON)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configuration parsed but is not usable
    #[error("Configuration error: {0}")]
    Config(String),
}
