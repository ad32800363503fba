//! Static benchmark tables and chunk planning

use crate::prober::constants::{COLUMN_BYTES, PIXEL_BYTES, WIDE_IMAGE_BYTES};
use crate::prober::error::{ProbeError, Result};

/// One row of a benchmark table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    pub chunk_size: usize,
    pub total_size: usize,
    pub description: &'static str,
}

impl TestCase {
    pub const fn new(chunk_size: usize, total_size: usize, description: &'static str) -> Self {
        Self {
            chunk_size,
            total_size,
            description,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ProbeError::InvalidCase {
                description: self.description,
                reason: "chunk size must be > 0".into(),
            });
        }
        if self.chunk_size > u32::MAX as usize - 1 {
            return Err(ProbeError::InvalidCase {
                description: self.description,
                reason: "chunk does not fit the 32-bit acknowledgement".into(),
            });
        }
        Ok(())
    }

    /// Sizes of the chunks this case sends, in order.
    pub fn chunks(&self) -> ChunkPlan {
        ChunkPlan::new(self.chunk_size, self.total_size)
    }

    pub fn chunk_count(&self) -> usize {
        if self.chunk_size == 0 {
            0
        } else {
            self.total_size.div_ceil(self.chunk_size)
        }
    }
}

/// Splits `total` into `chunk`-sized pieces, the last one holding the remainder.
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    chunk_size: usize,
    remaining: usize,
}

impl ChunkPlan {
    pub fn new(chunk_size: usize, total_size: usize) -> Self {
        Self {
            chunk_size,
            // A zero chunk size would never make progress.
            remaining: if chunk_size == 0 { 0 } else { total_size },
        }
    }
}

impl Iterator for ChunkPlan {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let size = self.chunk_size.min(self.remaining);
        self.remaining -= size;
        Some(size)
    }
}

/// Table run with the random payload.
///
/// The link comes up on the first byte, so the first case only opens it.
#[rustfmt::skip]
pub const RANDOM_CASES: &[TestCase] = &[
    TestCase::new(PIXEL_BYTES, PIXEL_BYTES, "single pixel to establish the connection"),
    TestCase::new(COLUMN_BYTES, WIDE_IMAGE_BYTES, "wide image in single columns"),
    TestCase::new(COLUMN_BYTES * 2, WIDE_IMAGE_BYTES, "wide image in 2 columns"),
    TestCase::new(COLUMN_BYTES * 3, WIDE_IMAGE_BYTES, "wide image in 3 columns"),
    TestCase::new(COLUMN_BYTES * 4, WIDE_IMAGE_BYTES, "wide image in 4 columns"),
    TestCase::new(COLUMN_BYTES * 5, WIDE_IMAGE_BYTES, "wide image in 5 columns"),
    TestCase::new(COLUMN_BYTES * 6, WIDE_IMAGE_BYTES, "wide image in 6 columns"),
    TestCase::new(COLUMN_BYTES * 7, WIDE_IMAGE_BYTES, "wide image in 7 columns"),
    TestCase::new(COLUMN_BYTES * 8, WIDE_IMAGE_BYTES, "wide image in 8 columns"),
    TestCase::new(COLUMN_BYTES * 9, WIDE_IMAGE_BYTES, "wide image in 9 columns"),
    TestCase::new(COLUMN_BYTES * 10, WIDE_IMAGE_BYTES, "wide image in 10 columns"),
    TestCase::new(WIDE_IMAGE_BYTES / 2, WIDE_IMAGE_BYTES, "wide image in 144 columns"),
    TestCase::new(WIDE_IMAGE_BYTES, WIDE_IMAGE_BYTES, "wide image in full"),
];

/// Table run with the pattern payload. Column aligned so the dot lands on the strip.
#[rustfmt::skip]
pub const PATTERN_CASES: &[TestCase] = &[
    TestCase::new(PIXEL_BYTES, PIXEL_BYTES, "single pixel to establish the connection"),
    TestCase::new(COLUMN_BYTES, WIDE_IMAGE_BYTES, "pattern in single columns"),
    TestCase::new(COLUMN_BYTES * 2, WIDE_IMAGE_BYTES, "pattern in 2 columns"),
    TestCase::new(COLUMN_BYTES * 4, WIDE_IMAGE_BYTES, "pattern in 4 columns"),
    TestCase::new(COLUMN_BYTES * 8, WIDE_IMAGE_BYTES, "pattern in 8 columns"),
];
