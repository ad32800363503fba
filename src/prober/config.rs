use crate::logging::validate_log_level;
use crate::prober::cases::{TestCase, PATTERN_CASES, RANDOM_CASES};
use crate::prober::constants::READ_TIMEOUT_MS;
use crate::prober::error::{ProbeError, Result};
use crate::prober::payload::{PatternPayload, PayloadSource, RandomPayload};
use clap::{Parser, ValueEnum};
use std::time::Duration;
use tracing::debug;

/// Which bytes fill each chunk.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Seeded random bytes
    Random,
    /// Diagonal moving dot image
    Pattern,
}

impl PayloadKind {
    pub fn cases(self) -> &'static [TestCase] {
        match self {
            PayloadKind::Random => RANDOM_CASES,
            PayloadKind::Pattern => PATTERN_CASES,
        }
    }

    pub fn source(self) -> Box<dyn PayloadSource> {
        match self {
            PayloadKind::Random => Box::new(RandomPayload::default()),
            PayloadKind::Pattern => Box::new(PatternPayload::new()),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ledbench-prober")]
#[command(about = "Measures acknowledged serial throughput to LED strip firmware")]
pub struct ProberConfig {
    /// Serial device to use (bind a Bluetooth device with `rfcomm bind 0 <addr>`)
    #[arg(long, default_value = "/dev/rfcomm0")]
    pub dev: String,

    /// Serial speed
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Payload strategy; each comes with its own case table
    #[arg(long, value_enum, default_value_t = PayloadKind::Random)]
    pub payload: PayloadKind,

    /// Hide per-case progress bars
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

impl ProberConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(READ_TIMEOUT_MS)
    }

    pub fn validate(&self) -> Result<()> {
        debug!("Validating prober configuration");
        if self.dev.is_empty() {
            return Err(ProbeError::Config("dev must not be empty".into()));
        }
        if self.baud == 0 {
            return Err(ProbeError::Config("baud must be > 0".into()));
        }
        validate_log_level(&self.log_level).map_err(ProbeError::Config)?;
        for case in self.payload.cases() {
            case.validate()?;
        }
        debug!("Prober configuration validated successfully");
        Ok(())
    }

    pub fn is_json_format(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
