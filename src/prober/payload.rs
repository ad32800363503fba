//! Payload strategies for the prober

use crate::prober::constants::{PATTERN_LEVEL, PIXEL_BYTES, RANDOM_SEED, STRIP_LEDS};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Produces the pixel bytes of each chunk.
///
/// Any `FnMut(&mut [u8])` closure is a payload source.
pub trait PayloadSource {
    /// Overwrite every byte of `buf` with payload.
    fn fill(&mut self, buf: &mut [u8]);

    fn next_payload(&mut self, size: usize) -> Vec<u8> {
        let mut buf = vec![0u8; size];
        self.fill(&mut buf);
        buf
    }
}

impl<F> PayloadSource for F
where
    F: FnMut(&mut [u8]),
{
    fn fill(&mut self, buf: &mut [u8]) {
        self(buf)
    }
}

/// Uniformly random bytes from a seeded generator.
pub struct RandomPayload {
    rng: StdRng,
}

impl RandomPayload {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPayload {
    fn default() -> Self {
        Self::new(RANDOM_SEED)
    }
}

impl PayloadSource for RandomPayload {
    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}

/// A single dot walking diagonally across a 144 LED tall image.
///
/// The stream is read column by column. In column `c` only the pixel at row
/// `c % 144` is lit, in one primary color that changes after every full
/// sweep (red, green, blue). The byte offset carries across chunks, so a
/// chunk boundary may fall inside a pixel.
#[derive(Debug, Default)]
pub struct PatternPayload {
    offset: usize,
}

impl PatternPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the byte at absolute stream position `offset`.
    pub fn byte_at(offset: usize) -> u8 {
        let pixel = offset / PIXEL_BYTES;
        let channel = offset % PIXEL_BYTES;
        let row = pixel % STRIP_LEDS;
        let column = pixel / STRIP_LEDS;
        let lit_row = column % STRIP_LEDS;
        let color = (column / STRIP_LEDS) % PIXEL_BYTES;

        if row == lit_row && channel == color {
            PATTERN_LEVEL
        } else {
            0
        }
    }
}

impl PayloadSource for PatternPayload {
    fn fill(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = Self::byte_at(self.offset);
            self.offset += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prober::constants::COLUMN_BYTES;

    #[test]
    fn test_random_payload_is_repeatable() {
        let a = RandomPayload::default().next_payload(512);
        let b = RandomPayload::default().next_payload(512);
        assert_eq!(a, b);
        assert_ne!(a, RandomPayload::new(7).next_payload(512));
    }

    #[test]
    fn test_random_payload_exact_size() {
        let mut source = RandomPayload::default();
        assert_eq!(source.next_payload(0).len(), 0);
        assert_eq!(source.next_payload(433).len(), 433);
    }

    #[test]
    fn test_pattern_one_lit_pixel_per_column() {
        let mut source = PatternPayload::new();
        for column in 0..(STRIP_LEDS * 3 + 5) {
            let data = source.next_payload(COLUMN_BYTES);
            let lit: Vec<usize> = data
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b != 0)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(lit.len(), 1, "column {}", column);
            let row = lit[0] / PIXEL_BYTES;
            let channel = lit[0] % PIXEL_BYTES;
            assert_eq!(row, column % STRIP_LEDS);
            assert_eq!(channel, (column / STRIP_LEDS) % PIXEL_BYTES);
        }
    }

    #[test]
    fn test_pattern_continues_across_odd_chunks() {
        let mut whole = PatternPayload::new();
        let expected = whole.next_payload(COLUMN_BYTES * 2);

        let mut split = PatternPayload::new();
        let mut got = split.next_payload(5);
        got.extend(split.next_payload(COLUMN_BYTES * 2 - 5));
        assert_eq!(got, expected);
    }

    #[test]
    fn test_closure_is_a_payload_source() {
        let mut ones = |buf: &mut [u8]| buf.fill(1);
        assert_eq!(ones.next_payload(3), vec![1, 1, 1]);
    }
}
