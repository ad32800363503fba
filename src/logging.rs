use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Valid values for the `--log-level` flag.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Initialize structured logging from CLI options.
///
/// `RUST_LOG` takes precedence over `level` when set, e.g.
/// `RUST_LOG=ledbench=debug` to trace every chunk.
/// Log lines go to stderr so measurements on stdout stay clean.
pub fn init_logging_with_config(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_line_number(true)
                    .with_file(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Check a `--log-level` value.
pub fn validate_log_level(level: &str) -> Result<(), String> {
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "log_level must be one of: {}",
            LOG_LEVELS.join(", ")
        ))
    }
}
