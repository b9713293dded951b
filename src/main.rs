use clap::Parser;

use pulsebox::config::{Cli, load_config};
use pulsebox::{FileSink, HttpProber, Result, Scheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env is fine, the environment and flags still apply
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli)?;

    log::info!(
        "Starting pulsebox v{}: {} endpoints every {}s, reports appended to {}",
        env!("CARGO_PKG_VERSION"),
        config.endpoints.len(),
        config.interval.as_secs(),
        config.log_file.display()
    );

    let prober = HttpProber::new()?;
    let sink = FileSink::open(&config.log_file).await?;

    let scheduler = Scheduler::new(prober, sink, config.endpoints, config.interval)
        .with_domain_width(config.max_domain_width);

    let max_cycles = config.max_cycles;
    let completed = scheduler
        .run(|cycle| max_cycles.is_none_or(|max| cycle <= max))
        .await?;

    log::info!("Stopped after {} cycles", completed);
    Ok(())
}
