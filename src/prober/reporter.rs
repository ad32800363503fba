use crate::prober::cases::TestCase;
use crate::prober::error::Result;
use crate::prober::runner::{CaseOutcome, CaseReport};
use crate::prober::statistics::AckStats;
use colored::*;
use std::time::Duration;
use tracing::debug;

/// Prints the benchmark table to stdout
pub struct Reporter;

impl Reporter {
    pub fn print_header(&self, baud: u32) {
        println!("Serial baud rate {}\n", baud);
    }

    pub fn print_case_start(&self, case: &TestCase) {
        println!("{}:", case.description);
    }

    /// Plain result line for one case, e.g. ` time 1.20 seconds, throughput 829440.00 bit/s`.
    pub fn format_outcome(outcome: &CaseOutcome) -> String {
        match outcome {
            CaseOutcome::Done(report) => format!(
                " time {:.2} seconds, throughput {:.2} bit/s",
                report.elapsed.as_secs_f64(),
                report.throughput_bps()
            ),
            CaseOutcome::Failed { error, .. } => format!(" ERROR: {}", error),
        }
    }

    /// One line summary of acknowledgement round trips, in milliseconds.
    pub fn format_round_trips(stats: &AckStats) -> String {
        let (slowest, slowest_rtt) = stats.slowest();
        format!(
            " ack round trip ms: mean {:.2}, p50 {:.2}, p99 {:.2}, slowest {:.2} (chunk {})",
            millis(stats.mean()),
            millis(stats.percentile(0.5)),
            millis(stats.percentile(0.99)),
            millis(slowest_rtt),
            slowest
        )
    }

    /// Range of rates single chunks reached, acknowledgement wait included.
    pub fn format_chunk_rates(stats: &AckStats) -> String {
        let (worst, best) = stats.chunk_rates();
        format!(
            " chunk throughput: worst {:.2} bit/s, best {:.2} bit/s",
            worst, best
        )
    }

    pub fn print_outcome(&self, outcome: &CaseOutcome) -> Result<()> {
        let line = Self::format_outcome(outcome);
        match outcome {
            CaseOutcome::Done(report) => {
                println!("{}", line.green());
                self.print_round_trips(report)?;
            }
            CaseOutcome::Failed { state, .. } => {
                println!("{}", line.red().bold());
                println!("{}", format!(" stopped {}", state).dimmed());
            }
        }
        println!();
        Ok(())
    }

    fn print_round_trips(&self, report: &CaseReport) -> Result<()> {
        // A single chunk says nothing about spread.
        if report.chunks() < 2 {
            return Ok(());
        }
        let stats = AckStats::new(&report.acks)?;
        println!("{}", Self::format_round_trips(&stats).dimmed());
        println!("{}", Self::format_chunk_rates(&stats).dimmed());
        Ok(())
    }

    /// Closing line: how many cases completed.
    pub fn print_summary(&self, outcomes: &[CaseOutcome]) {
        let done = outcomes.iter().filter(|o| o.is_done()).count();
        debug!(done = done, total = outcomes.len(), "Printing summary");
        let line = format!("{}/{} cases completed", done, outcomes.len());
        if done == outcomes.len() {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line.yellow().bold());
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prober::error::ProbeError;
    use crate::prober::runner::CaseState;
    use crate::prober::statistics::ChunkAck;

    /// 288 column chunks at 5 ms each, except chunk 17 at 9 ms.
    fn report() -> CaseReport {
        let mut acks = vec![
            ChunkAck {
                bytes: 433,
                round_trip: Duration::from_millis(5),
            };
            288
        ];
        acks[17].round_trip = Duration::from_millis(9);
        CaseReport {
            case: TestCase::new(432, 124_416, "wide image in single columns"),
            elapsed: Duration::from_secs(2),
            acks,
        }
    }

    #[test]
    fn test_format_success() {
        let line = Reporter::format_outcome(&CaseOutcome::Done(report()));
        assert_eq!(line, " time 2.00 seconds, throughput 497664.00 bit/s");
    }

    #[test]
    fn test_format_failure() {
        let outcome = CaseOutcome::Failed {
            case: TestCase::new(4, 9, "nine"),
            state: CaseState::Validating(1),
            error: ProbeError::CrcMismatch {
                iteration: 1,
                got: 1,
                want: 2,
            },
        };
        assert_eq!(
            Reporter::format_outcome(&outcome),
            " ERROR: error iteration 1 got CRC 1 want 2"
        );
    }

    #[test]
    fn test_format_round_trips_names_slowest_chunk() -> Result<()> {
        let stats = AckStats::new(&report().acks)?;
        let line = Reporter::format_round_trips(&stats);
        assert!(line.contains("p50 5.00"), "{}", line);
        assert!(line.ends_with("slowest 9.00 (chunk 17)"), "{}", line);
        Ok(())
    }

    #[test]
    fn test_format_chunk_rates() -> Result<()> {
        let stats = AckStats::new(&report().acks)?;
        assert_eq!(
            Reporter::format_chunk_rates(&stats),
            " chunk throughput: worst 384888.89 bit/s, best 692800.00 bit/s"
        );
        Ok(())
    }

    #[test]
    fn test_print_outcome_and_summary() -> Result<()> {
        let outcomes = vec![CaseOutcome::Done(report())];
        Reporter.print_outcome(&outcomes[0])?;
        Reporter.print_summary(&outcomes);
        Ok(())
    }
}
