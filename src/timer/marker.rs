use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Byte the firmware sends once a frame has been pushed to the strip.
pub const END_MARKER: u8 = b'.';

/// LED driver library announced by a start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Library {
    FastLed,
    Adafruit,
    Dma,
}

impl Library {
    pub fn from_marker(byte: u8) -> Option<Self> {
        match byte {
            b'f' => Some(Library::FastLed),
            b'a' => Some(Library::Adafruit),
            b'd' => Some(Library::Dma),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Library::FastLed => "fastLED",
            Library::Adafruit => "adafruit",
            Library::Dma => "DMA",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One completed render measurement. Printed, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyRecord {
    pub library: Library,
    pub elapsed: Duration,
}

impl fmt::Display for LatencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.library, self.elapsed)
    }
}

/// Outcome of feeding one byte to the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started(Library),
    Finished(LatencyRecord),
    /// End marker before any start marker.
    NoStart,
    Unknown(u8),
}

/// Tracks the most recent start marker.
#[derive(Debug, Default)]
pub struct LatencyTimer {
    started: Option<(Library, Instant)>,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, byte: u8, now: Instant) -> TimerEvent {
        if byte == END_MARKER {
            return match self.started {
                Some((library, start)) => {
                    let elapsed = now.saturating_duration_since(start);
                    debug!(
                        library = library.name(),
                        elapsed_us = elapsed.as_micros() as u64,
                        "Frame finished"
                    );
                    TimerEvent::Finished(LatencyRecord { library, elapsed })
                }
                None => TimerEvent::NoStart,
            };
        }

        match Library::from_marker(byte) {
            Some(library) => {
                // A second start before '.' replaces the pending one.
                self.started = Some((library, now));
                TimerEvent::Started(library)
            }
            None => TimerEvent::Unknown(byte),
        }
    }

    pub fn active_library(&self) -> Option<Library> {
        self.started.map(|(library, _)| library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_marker_before_start_is_skipped() {
        let mut timer = LatencyTimer::new();
        assert_eq!(timer.observe(b'.', Instant::now()), TimerEvent::NoStart);
        assert_eq!(timer.active_library(), None);
    }

    #[test]
    fn test_start_then_end_reports_elapsed() {
        let mut timer = LatencyTimer::new();
        let t0 = Instant::now();
        assert_eq!(
            timer.observe(b'a', t0),
            TimerEvent::Started(Library::Adafruit)
        );

        let event = timer.observe(b'.', t0 + Duration::from_millis(7));
        assert_eq!(
            event,
            TimerEvent::Finished(LatencyRecord {
                library: Library::Adafruit,
                elapsed: Duration::from_millis(7),
            })
        );
    }

    #[test]
    fn test_restart_overwrites_pending_measurement() {
        let mut timer = LatencyTimer::new();
        let t0 = Instant::now();
        timer.observe(b'f', t0);
        timer.observe(b'd', t0 + Duration::from_millis(5));

        match timer.observe(b'.', t0 + Duration::from_millis(8)) {
            TimerEvent::Finished(record) => {
                assert_eq!(record.library, Library::Dma);
                assert_eq!(record.elapsed, Duration::from_millis(3));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_repeated_end_markers_measure_from_same_start() {
        let mut timer = LatencyTimer::new();
        let t0 = Instant::now();
        timer.observe(b'f', t0);
        timer.observe(b'.', t0 + Duration::from_millis(1));
        match timer.observe(b'.', t0 + Duration::from_millis(2)) {
            TimerEvent::Finished(record) => assert_eq!(record.elapsed, Duration::from_millis(2)),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_unknown_byte_keeps_state() {
        let mut timer = LatencyTimer::new();
        timer.observe(b'f', Instant::now());
        assert_eq!(
            timer.observe(b'x', Instant::now()),
            TimerEvent::Unknown(b'x')
        );
        assert_eq!(timer.active_library(), Some(Library::FastLed));
    }

    #[test]
    fn test_record_display() {
        let record = LatencyRecord {
            library: Library::FastLed,
            elapsed: Duration::from_micros(12_500),
        };
        assert_eq!(record.to_string(), "fastLED 12.5ms");
    }
}
