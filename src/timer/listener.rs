use crate::timer::error::Result;
use crate::timer::marker::{LatencyTimer, TimerEvent};
use std::io::{ErrorKind, Read, Write};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Perform a single one-byte read from `port` and act on it.
///
/// Read errors and empty reads are logged and swallowed; only a failure to
/// write a record to `out` is returned.
pub fn listen_once<R, W>(
    port: &mut R,
    timer: &mut LatencyTimer,
    out: &mut W,
) -> Result<Option<TimerEvent>>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut buf = [0u8; 1];
    let n = match port.read(&mut buf) {
        Ok(n) => n,
        Err(e) if e.kind() == ErrorKind::TimedOut => {
            debug!("No marker before read timeout");
            return Ok(None);
        }
        Err(e) => {
            error!(error = %e, "Serial read failed");
            return Ok(None);
        }
    };
    if n == 0 {
        return Ok(None);
    }

    let event = timer.observe(buf[0], Instant::now());
    match &event {
        TimerEvent::Finished(record) => {
            writeln!(out, "{}", record)?;
            out.flush()?;
        }
        TimerEvent::Started(library) => {
            debug!(library = library.name(), "Frame started");
        }
        TimerEvent::NoStart => {
            debug!("End marker without a start, skipping first run");
        }
        TimerEvent::Unknown(byte) => {
            let shown = (*byte as char).escape_default().to_string();
            warn!(byte = %shown, "unknown byte");
        }
    }
    Ok(Some(event))
}

/// Read markers from `port` until writing to `out` fails.
pub fn listen<R, W>(port: &mut R, out: &mut W) -> Result<()>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut timer = LatencyTimer::new();
    loop {
        listen_once(port, &mut timer, out)?;
    }
}
