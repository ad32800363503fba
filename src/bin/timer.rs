use anyhow::{Context, Result};
use clap::Parser;
use ledbench::logging::init_logging_with_config;
use ledbench::serial;
use ledbench::timer::{listen, TimerConfig};
use std::io;
use tracing::{error, info};

fn main() {
    let config = TimerConfig::parse();

    init_logging_with_config(&config.log_level, config.is_json_format());

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        error!(error = %e, "Timer failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: TimerConfig) -> Result<()> {
    let mut port = serial::open(&config.dev, config.baud, config.read_timeout())
        .with_context(|| format!("cannot open serial {}", config.dev))?;

    info!(dev = %config.dev, baud = config.baud, "Listening for render markers");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    listen(&mut port, &mut out).context("writing measurements")?;
    Ok(())
}
