use crate::prober::cases::TestCase;
use crate::prober::constants::PROGRESS_TICK_INTERVAL_MS;
use crate::prober::error::{ProbeError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PROGRESS_TEMPLATE: &str = " {bar:40.cyan/blue} {pos:>5}/{len:5} chunks [{elapsed_precise}]";

/// Per-case chunk progress bar
pub struct ChunkProgress {
    pb: ProgressBar,
}

impl ChunkProgress {
    pub fn new(case: &TestCase, quiet: bool) -> Result<Self> {
        let len = case.chunk_count() as u64;
        if quiet {
            return Ok(Self::hidden(len));
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .map_err(|e| ProbeError::Progress(e.to_string()))?
            .progress_chars("█░");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_INTERVAL_MS));
        Ok(Self { pb })
    }

    pub fn hidden(len: u64) -> Self {
        let pb = ProgressBar::hidden();
        pb.set_length(len);
        Self { pb }
    }

    pub fn chunk_done(&self) {
        self.pb.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    /// Remove the bar so the result line replaces it.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
