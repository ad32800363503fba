//! ledbench - serial link benchmarks for LED strip firmware
//!
//! Two tools share this library: a latency timer that timestamps the marker
//! bytes a firmware emits around each frame render, and a throughput prober
//! that streams pixel chunks to a device and validates its byte-count/CRC
//! acknowledgement.

pub mod logging;
pub mod prober;
pub mod serial;
pub mod timer;
