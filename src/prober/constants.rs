//! Constants used throughout the prober

/// Port read timeout; also the wait granted to each acknowledgement attempt.
pub const READ_TIMEOUT_MS: u64 = 2_000;

/// Attempts per acknowledgement word before the case is failed.
///
/// Bluetooth serial bridges can stay silent for longer than one read timeout
/// while the firmware pushes a large chunk to the strip.
pub const ACK_READ_ATTEMPTS: usize = 5;

/// Size of one acknowledgement word (little-endian u32).
pub const ACK_WORD_LEN: usize = 4;

/// Seed for the random payload so runs are repeatable.
pub const RANDOM_SEED: u64 = 123;

/// LEDs on the strip, i.e. pixels per image column.
pub const STRIP_LEDS: usize = 144;

/// Bytes per RGB pixel
pub const PIXEL_BYTES: usize = 3;

/// One full strip column.
pub const COLUMN_BYTES: usize = STRIP_LEDS * PIXEL_BYTES;

/// A 288 column wide image.
pub const WIDE_IMAGE_BYTES: usize = COLUMN_BYTES * 288;

/// Channel value of the lit pixel in the pattern payload.
pub const PATTERN_LEVEL: u8 = 0x40;

/// Longest acknowledgement round trip the histogram resolves, in microseconds
pub const HISTOGRAM_HIGH_BOUND_US: u64 = 60_000_000;

/// Histogram significant digits for precision
pub const HISTOGRAM_SIGNIFICANT_DIGITS: u8 = 3;

/// Progress bar tick interval in milliseconds
pub const PROGRESS_TICK_INTERVAL_MS: u64 = 100;
