use std::fmt;
use thiserror::Error;

/// Which half of the acknowledgement was being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckField {
    Count,
    Crc,
}

impl fmt::Display for AckField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AckField::Count => f.write_str("number of bytes received"),
            AckField::Crc => f.write_str("crc"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid test case \"{description}\": {reason}")]
    InvalidCase {
        description: &'static str,
        reason: String,
    },

    #[error("error iteration {iteration} writing {expected} bytes: {source}")]
    Write {
        iteration: usize,
        expected: usize,
        source: std::io::Error,
    },

    #[error(
        "error iteration {iteration} writing {expected} bytes: wrote only {written} bytes"
    )]
    ShortWrite {
        iteration: usize,
        expected: usize,
        written: usize,
    },

    #[error("error iteration {iteration} reading {field}: {source}")]
    AckRead {
        iteration: usize,
        field: AckField,
        source: std::io::Error,
    },

    #[error(
        "error iteration {iteration} received {received} bytes, sent {sent} bytes"
    )]
    CountMismatch {
        iteration: usize,
        received: u32,
        sent: usize,
    },

    #[error("error iteration {iteration} got CRC {got} want {want}")]
    CrcMismatch {
        iteration: usize,
        got: u32,
        want: u32,
    },

    #[error("Statistics error: {0}")]
    Statistics(String),

    #[error("Progress display error: {0}")]
    Progress(String),
}

impl ProbeError {
    /// Chunk index the error happened on, for per-chunk failures.
    pub fn iteration(&self) -> Option<usize> {
        match self {
            ProbeError::Write { iteration, .. }
            | ProbeError::ShortWrite { iteration, .. }
            | ProbeError::AckRead { iteration, .. }
            | ProbeError::CountMismatch { iteration, .. }
            | ProbeError::CrcMismatch { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
