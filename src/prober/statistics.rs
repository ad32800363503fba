//! Acknowledgement round trips of one test case

use crate::prober::constants::{HISTOGRAM_HIGH_BOUND_US, HISTOGRAM_SIGNIFICANT_DIGITS};
use crate::prober::error::{ProbeError, Result};
use hdrhistogram::Histogram;
use std::time::Duration;
use tracing::debug;

/// One acknowledged chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkAck {
    /// Bytes on the wire, terminator included
    pub bytes: usize,
    /// From the start of the write until both acknowledgement words were read
    pub round_trip: Duration,
}

impl ChunkAck {
    /// Rate this chunk alone achieved, counting the wait for its acknowledgement.
    pub fn bits_per_second(&self) -> f64 {
        let secs = self.round_trip.max(Duration::from_nanos(1)).as_secs_f64();
        (self.bytes * 8) as f64 / secs
    }
}

/// Round-trip distribution and per-chunk rates of a completed case.
pub struct AckStats {
    /// Round trips in microseconds
    hist: Histogram<u64>,
    slowest: usize,
    slowest_round_trip: Duration,
    worst_bps: f64,
    best_bps: f64,
}

impl AckStats {
    pub fn new(acks: &[ChunkAck]) -> Result<Self> {
        let (slowest, slowest_ack) = acks
            .iter()
            .enumerate()
            .max_by_key(|(_, ack)| ack.round_trip)
            .ok_or_else(|| ProbeError::Statistics("no chunks".into()))?;

        let mut hist = round_trip_histogram()?;

        let mut worst_bps = f64::INFINITY;
        let mut best_bps = 0.0_f64;
        for ack in acks {
            // Past a minute lands in the top bucket; `slowest` keeps the real value.
            hist.saturating_record(ack.round_trip.as_micros() as u64);
            let bps = ack.bits_per_second();
            worst_bps = worst_bps.min(bps);
            best_bps = best_bps.max(bps);
        }

        debug!(
            chunks = acks.len(),
            slowest_chunk = slowest,
            slowest_us = slowest_ack.round_trip.as_micros() as u64,
            worst_bps = worst_bps,
            best_bps = best_bps,
            "Acknowledgement statistics calculated"
        );

        Ok(Self {
            hist,
            slowest,
            slowest_round_trip: slowest_ack.round_trip,
            worst_bps,
            best_bps,
        })
    }

    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    pub fn mean(&self) -> Duration {
        Duration::from_secs_f64(self.hist.mean() / 1_000_000.0)
    }

    pub fn percentile(&self, quantile: f64) -> Duration {
        Duration::from_micros(self.hist.value_at_quantile(quantile))
    }

    /// Index and round trip of the chunk that waited longest for its acknowledgement.
    pub fn slowest(&self) -> (usize, Duration) {
        (self.slowest, self.slowest_round_trip)
    }

    /// Lowest and highest single-chunk rate, in bit/s.
    pub fn chunk_rates(&self) -> (f64, f64) {
        (self.worst_bps, self.best_bps)
    }
}

fn round_trip_histogram() -> Result<Histogram<u64>> {
    Histogram::new_with_max(HISTOGRAM_HIGH_BOUND_US, HISTOGRAM_SIGNIFICANT_DIGITS)
        .map_err(|e| ProbeError::Statistics(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack(bytes: usize, ms: u64) -> ChunkAck {
        ChunkAck {
            bytes,
            round_trip: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_slowest_chunk_is_located() -> Result<()> {
        let acks = [ack(433, 4), ack(433, 12), ack(433, 5), ack(2, 1)];
        let stats = AckStats::new(&acks)?;

        assert_eq!(stats.count(), 4);
        assert_eq!(stats.slowest(), (1, Duration::from_millis(12)));
        Ok(())
    }

    #[test]
    fn test_chunk_rates_span_the_case() -> Result<()> {
        // 100 bytes in 10 ms and 100 bytes in 1 ms
        let stats = AckStats::new(&[ack(100, 10), ack(100, 1)])?;
        let (worst, best) = stats.chunk_rates();
        assert!((worst - 80_000.0).abs() < 1e-6);
        assert!((best - 800_000.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_instant_ack_has_finite_rate() {
        let rate = ack(10, 0).bits_per_second();
        assert!(rate.is_finite());
        assert!(rate > 0.0);
    }

    #[test]
    fn test_round_trip_past_histogram_range_is_kept() -> Result<()> {
        let stats = AckStats::new(&[ack(9, 3), ack(9, 120_000)])?;
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.slowest(), (1, Duration::from_secs(120)));
        assert!(stats.percentile(1.0) >= Duration::from_secs(59));
        Ok(())
    }

    #[test]
    fn test_percentiles_in_milliseconds() -> Result<()> {
        let acks: Vec<ChunkAck> = (1..=100).map(|ms| ack(433, ms)).collect();
        let stats = AckStats::new(&acks)?;

        let p50 = stats.percentile(0.5).as_secs_f64() * 1_000.0;
        assert!((p50 - 50.0).abs() < 0.1, "p50 {}", p50);
        assert!(stats.mean() > Duration::from_millis(50));
        Ok(())
    }

    #[test]
    fn test_no_chunks_is_an_error() {
        assert!(matches!(AckStats::new(&[]), Err(ProbeError::Statistics(_))));
    }
}
