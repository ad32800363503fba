use crate::logging::validate_log_level;
use crate::timer::error::{Result, TimerError};
use clap::Parser;
use std::time::Duration;
use tracing::debug;

/// The timer blocks on the port; a timeout only bounds a single read call.
const READ_TIMEOUT_SECS: u64 = 60;

#[derive(Parser, Debug, Clone)]
#[command(name = "ledbench-timer")]
#[command(about = "Prints per-library frame render latency reported over serial")]
pub struct TimerConfig {
    /// Serial device to use
    #[arg(long, default_value = "/dev/ttyACM0")]
    pub dev: String,

    /// Serial speed
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

impl TimerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(READ_TIMEOUT_SECS)
    }

    pub fn validate(&self) -> Result<()> {
        debug!("Validating timer configuration");
        if self.dev.is_empty() {
            return Err(TimerError::Config("dev must not be empty".into()));
        }
        if self.baud == 0 {
            return Err(TimerError::Config("baud must be > 0".into()));
        }
        validate_log_level(&self.log_level).map_err(TimerError::Config)?;
        Ok(())
    }

    pub fn is_json_format(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimerConfig {
        TimerConfig {
            dev: "/dev/ttyACM0".to_string(),
            baud: 115_200,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_default_args() {
        let parsed = TimerConfig::parse_from(["timer"]);
        assert_eq!(parsed.dev, "/dev/ttyACM0");
        assert_eq!(parsed.baud, 115_200);
        assert!(!parsed.is_json_format());
    }

    #[test]
    fn test_custom_args() {
        let parsed =
            TimerConfig::parse_from(["timer", "--dev", "/dev/ttyUSB1", "--baud", "921600"]);
        assert_eq!(parsed.dev, "/dev/ttyUSB1");
        assert_eq!(parsed.baud, 921_600);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_invalid_baud() {
        let mut cfg = config();
        cfg.baud = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut cfg = config();
        cfg.log_level = "chatty".to_string();
        assert!(matches!(cfg.validate(), Err(TimerError::Config(_))));
    }
}
