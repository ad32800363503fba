//! Serial port access shared by both tools

use serialport::SerialPort;
use std::time::Duration;
use tracing::{debug, warn};

/// Open `path` at `baud` with the given read timeout.
pub fn open(path: &str, baud: u32, timeout: Duration) -> serialport::Result<Box<dyn SerialPort>> {
    debug!(
        path = path,
        baud = baud,
        timeout_ms = timeout.as_millis() as u64,
        "Opening serial port"
    );
    let port = serialport::new(path, baud)
        .timeout(timeout)
        .open()
        .map_err(|e| {
            warn!(path = path, error = %e, "Failed to open serial port");
            e
        })?;
    debug!(path = path, "Serial port opened");
    Ok(port)
}
