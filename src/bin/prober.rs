use anyhow::{Context, Result};
use clap::Parser;
use ledbench::logging::init_logging_with_config;
use ledbench::prober::{run_cases, PortLink, ProberConfig, Reporter};
use ledbench::serial;
use tracing::{error, info};

fn main() {
    let config = ProberConfig::parse();

    init_logging_with_config(&config.log_level, config.is_json_format());

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        error!(error = %e, "Prober failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: ProberConfig) -> Result<()> {
    let port = serial::open(&config.dev, config.baud, config.read_timeout())
        .with_context(|| format!("cannot open serial {}", config.dev))?;
    let mut link = PortLink::new(port);

    let reporter = Reporter;
    reporter.print_header(config.baud);

    let cases = config.payload.cases();
    let mut payload = config.payload.source();
    info!(
        dev = %config.dev,
        payload = ?config.payload,
        cases = cases.len(),
        "Starting throughput benchmark"
    );

    let outcomes = run_cases(&mut link, &mut *payload, cases, &reporter, config.quiet)
        .context("running benchmark")?;
    reporter.print_summary(&outcomes);
    Ok(())
}
