//! Latency timer: turns firmware marker bytes into per-library render times

pub mod config;
pub mod error;
pub mod listener;
pub mod marker;

pub use config::TimerConfig;
pub use error::{Result, TimerError};
pub use listener::{listen, listen_once};
pub use marker::{LatencyRecord, LatencyTimer, Library, TimerEvent, END_MARKER};
