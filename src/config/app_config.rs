use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::probe_config::{Endpoint, load_endpoints};
use crate::cycle::state::extract_domain;
use crate::error::{MonitorError, Result};

pub const DEFAULT_LOG_FILE: &str = "health_check_log.txt";
const MAX_DOMAIN_WIDTH: usize = 48;

/// Command line arguments. Every flag can also be supplied through the
/// environment (or a `.env` file).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pulsebox",
    version,
    about = "Probe HTTP endpoints on a fixed interval and log per-domain availability"
)]
pub struct Cli {
    /// Path to the YAML endpoint file
    #[arg(env = "CONFIG_FILE", default_value = "config.yml")]
    pub config_file: PathBuf,

    /// File the cycle reports are appended to
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Seconds between the start of consecutive cycles
    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = 15)]
    pub interval_seconds: u64,

    /// Stop after this many cycles instead of running forever
    #[arg(long, env = "MAX_CYCLES")]
    pub max_cycles: Option<u64>,
}

pub struct AppConfig {
    pub endpoints: Vec<Endpoint>,
    pub log_file: PathBuf,
    pub interval: Duration,
    pub max_cycles: Option<u64>,
    pub max_domain_width: usize,
}

/// Load the application configuration from the parsed command line.
/// Reads and validates the endpoint file and derives the column width used
/// for the operator output.
pub fn load_config(cli: Cli) -> Result<AppConfig> {
    if cli.interval_seconds == 0 {
        return Err(MonitorError::Config(
            "interval_seconds must be greater than 0".to_string(),
        ));
    }

    let endpoints = load_endpoints(&cli.config_file)?;

    let max_domain_width = endpoints
        .iter()
        .map(|endpoint| extract_domain(&endpoint.url).chars().count())
        .max()
        .unwrap_or(10)
        .min(MAX_DOMAIN_WIDTH);

    log::info!(
        "Loaded {} endpoints from {}",
        endpoints.len(),
        cli.config_file.display()
    );

    Ok(AppConfig {
        endpoints,
        log_file: cli.log_file,
        interval: Duration::from_secs(cli.interval_seconds),
        max_cycles: cli.max_cycles,
        max_domain_width,
    })
}
