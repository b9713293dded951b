pub mod app_config;
pub mod probe_config;

pub use app_config::{AppConfig, Cli, load_config};
pub use probe_config::{Endpoint, load_endpoints, parse_endpoints};
