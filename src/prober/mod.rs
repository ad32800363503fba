//! Throughput prober: acknowledged chunk transfers over a serial link

pub mod ack;
pub mod cases;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod link;
pub mod payload;
pub mod progress;
pub mod reporter;
pub mod runner;
pub mod statistics;

pub use ack::{read_ack_word, Ack, ACK_SIZE};
pub use cases::{ChunkPlan, TestCase, PATTERN_CASES, RANDOM_CASES};
pub use config::{PayloadKind, ProberConfig};
pub use constants::*;
pub use error::{AckField, ProbeError, Result};
pub use frame::{checksum, Frame, TERMINATOR};
pub use link::{Link, PortLink};
pub use payload::{PatternPayload, PayloadSource, RandomPayload};
pub use progress::ChunkProgress;
pub use reporter::Reporter;
pub use runner::{run_cases, send_test_data, CaseFailure, CaseOutcome, CaseReport, CaseState};
pub use statistics::{AckStats, ChunkAck};
