use crate::prober::ack::{read_ack_word, Ack};
use crate::prober::cases::TestCase;
use crate::prober::error::{AckField, ProbeError, Result};
use crate::prober::frame::Frame;
use crate::prober::link::Link;
use crate::prober::payload::PayloadSource;
use crate::prober::progress::ChunkProgress;
use crate::prober::reporter::Reporter;
use crate::prober::statistics::ChunkAck;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Where a test case is in its send/acknowledge cycle.
///
/// The terminal states are the two `CaseOutcome` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    Idle,
    Sending(usize),
    AwaitingAck(usize),
    Validating(usize),
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseState::Idle => f.write_str("before the first chunk"),
            CaseState::Sending(i) => write!(f, "sending chunk {}", i),
            CaseState::AwaitingAck(i) => write!(f, "awaiting acknowledgement of chunk {}", i),
            CaseState::Validating(i) => write!(f, "validating chunk {}", i),
        }
    }
}

fn enter(state: &mut CaseState, next: CaseState) {
    debug!(from = %state, to = %next, "Case state");
    *state = next;
}

/// A case that stopped early, with the state it stopped in.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct CaseFailure {
    pub state: CaseState,
    pub error: ProbeError,
}

impl From<CaseFailure> for ProbeError {
    fn from(failure: CaseFailure) -> Self {
        failure.error
    }
}

/// Result of a test case that completed every chunk
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case: TestCase,
    pub elapsed: Duration,
    /// Every chunk in send order
    pub acks: Vec<ChunkAck>,
}

impl CaseReport {
    pub fn chunks(&self) -> usize {
        self.acks.len()
    }

    /// Payload bits per second over the whole case.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.elapsed.max(Duration::from_nanos(1)).as_secs_f64();
        (self.case.total_size * 8) as f64 / secs
    }
}

#[derive(Debug)]
pub enum CaseOutcome {
    Done(CaseReport),
    Failed {
        case: TestCase,
        state: CaseState,
        error: ProbeError,
    },
}

impl CaseOutcome {
    pub fn case(&self) -> &TestCase {
        match self {
            CaseOutcome::Done(report) => &report.case,
            CaseOutcome::Failed { case, .. } => case,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CaseOutcome::Done(_))
    }
}

/// Send one test case chunk by chunk, validating each acknowledgement.
///
/// The first failing chunk aborts the case; nothing is retried.
pub fn send_test_data<L, P>(
    link: &mut L,
    payload: &mut P,
    case: &TestCase,
    progress: &ChunkProgress,
) -> std::result::Result<CaseReport, CaseFailure>
where
    L: Link + ?Sized,
    P: PayloadSource + ?Sized,
{
    let mut state = CaseState::Idle;
    case.validate()
        .and_then(|()| send_chunks(link, payload, case, progress, &mut state))
        .map_err(|error| CaseFailure { state, error })
}

fn send_chunks<L, P>(
    link: &mut L,
    payload: &mut P,
    case: &TestCase,
    progress: &ChunkProgress,
    state: &mut CaseState,
) -> Result<CaseReport>
where
    L: Link + ?Sized,
    P: PayloadSource + ?Sized,
{
    let mut acks = Vec::with_capacity(case.chunk_count());
    let start = Instant::now();

    for (iteration, size) in case.chunks().enumerate() {
        enter(state, CaseState::Sending(iteration));
        let frame = Frame::new(payload.next_payload(size));
        let sent_at = Instant::now();

        let written = link.write_chunk(frame.bytes()).map_err(|source| ProbeError::Write {
            iteration,
            expected: frame.len(),
            source,
        })?;
        if written != frame.len() {
            return Err(ProbeError::ShortWrite {
                iteration,
                expected: frame.len(),
                written,
            });
        }

        enter(state, CaseState::AwaitingAck(iteration));
        let received = read_ack_word(link).map_err(|source| ProbeError::AckRead {
            iteration,
            field: AckField::Count,
            source,
        })?;
        let crc = read_ack_word(link).map_err(|source| ProbeError::AckRead {
            iteration,
            field: AckField::Crc,
            source,
        })?;
        let round_trip = sent_at.elapsed();

        enter(state, CaseState::Validating(iteration));
        Ack { received, crc }.validate(&frame, iteration)?;

        debug!(
            iteration = iteration,
            bytes = frame.len(),
            crc = frame.crc(),
            rtt_us = round_trip.as_micros() as u64,
            "Chunk acknowledged"
        );
        acks.push(ChunkAck {
            bytes: frame.len(),
            round_trip,
        });
        progress.chunk_done();
    }

    Ok(CaseReport {
        case: *case,
        elapsed: start.elapsed(),
        acks,
    })
}

/// Run `cases` in order. A failed case is reported and the next one runs.
pub fn run_cases<L, P>(
    link: &mut L,
    payload: &mut P,
    cases: &[TestCase],
    reporter: &Reporter,
    quiet: bool,
) -> Result<Vec<CaseOutcome>>
where
    L: Link + ?Sized,
    P: PayloadSource + ?Sized,
{
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        reporter.print_case_start(case);
        let progress = ChunkProgress::new(case, quiet)?;

        let outcome = match send_test_data(link, payload, case, &progress) {
            Ok(report) => {
                info!(
                    case = case.description,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    throughput_bps = report.throughput_bps(),
                    "Case completed"
                );
                CaseOutcome::Done(report)
            }
            Err(CaseFailure { state, error }) => {
                warn!(
                    case = case.description,
                    chunks_acknowledged = progress.position(),
                    state = %state,
                    error = %error,
                    "Case failed"
                );
                CaseOutcome::Failed {
                    case: *case,
                    state,
                    error,
                }
            }
        };
        progress.finish();

        reporter.print_outcome(&outcome)?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
