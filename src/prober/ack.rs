use crate::prober::constants::{ACK_READ_ATTEMPTS, ACK_WORD_LEN};
use crate::prober::error::{ProbeError, Result};
use crate::prober::frame::{checksum, Frame};
use crate::prober::link::Link;
use std::io::{self, ErrorKind};
use tracing::{debug, warn};

/// Size of a full acknowledgement on the wire.
pub const ACK_SIZE: usize = ACK_WORD_LEN * 2;

/// What the firmware reports after receiving a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub received: u32,
    pub crc: u32,
}

impl Ack {
    /// The acknowledgement a correct receiver sends for `data`.
    pub fn for_data(data: &[u8]) -> Self {
        Self {
            received: data.len() as u32,
            crc: checksum(data),
        }
    }

    pub fn encode(&self) -> [u8; ACK_SIZE] {
        let mut buf = [0u8; ACK_SIZE];
        buf[..ACK_WORD_LEN].copy_from_slice(&self.received.to_le_bytes());
        buf[ACK_WORD_LEN..].copy_from_slice(&self.crc.to_le_bytes());
        buf
    }

    /// Check this acknowledgement against the frame sent as chunk `iteration`.
    pub fn validate(&self, frame: &Frame, iteration: usize) -> Result<()> {
        if self.received as usize != frame.len() {
            warn!(
                iteration = iteration,
                received = self.received,
                sent = frame.len(),
                "Byte count mismatch"
            );
            return Err(ProbeError::CountMismatch {
                iteration,
                received: self.received,
                sent: frame.len(),
            });
        }
        if self.crc != frame.crc() {
            warn!(
                iteration = iteration,
                got = self.crc,
                want = frame.crc(),
                "CRC mismatch"
            );
            return Err(ProbeError::CrcMismatch {
                iteration,
                got: self.crc,
                want: frame.crc(),
            });
        }
        Ok(())
    }
}

enum WordRead {
    /// Nothing of the word arrived before the port gave up.
    Idle(io::Error),
    Failed(io::Error),
}

fn fill_word<L: Link + ?Sized>(
    link: &mut L,
    word: &mut [u8; ACK_WORD_LEN],
) -> std::result::Result<(), WordRead> {
    let mut filled = 0;
    while filled < ACK_WORD_LEN {
        match link.read_some(&mut word[filled..]) {
            Ok(0) if filled == 0 => {
                return Err(WordRead::Idle(io::Error::from(ErrorKind::UnexpectedEof)));
            }
            Ok(0) => {
                return Err(WordRead::Failed(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("got {} of {} bytes", filled, ACK_WORD_LEN),
                )));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::TimedOut && filled == 0 => {
                return Err(WordRead::Idle(e));
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                return Err(WordRead::Failed(io::Error::new(
                    ErrorKind::TimedOut,
                    format!("timed out after {} of {} bytes", filled, ACK_WORD_LEN),
                )));
            }
            Err(e) => return Err(WordRead::Failed(e)),
        }
    }
    Ok(())
}

/// Read one little-endian u32 of the acknowledgement.
///
/// A read that ends before the first byte of the word arrives (timeout or
/// empty read) is retried, up to `ACK_READ_ATTEMPTS` reads in total. Once a
/// byte has arrived the rest must follow without a gap.
pub fn read_ack_word<L: Link + ?Sized>(link: &mut L) -> io::Result<u32> {
    let mut word = [0u8; ACK_WORD_LEN];
    let mut last_idle = None;

    for attempt in 1..=ACK_READ_ATTEMPTS {
        match fill_word(link, &mut word) {
            Ok(()) => {
                let value = u32::from_le_bytes(word);
                debug!(
                    attempt = attempt,
                    value = value,
                    "Acknowledgement word read"
                );
                return Ok(value);
            }
            Err(WordRead::Idle(e)) => {
                warn!(attempt = attempt, error = %e, "read error");
                last_idle = Some(e);
            }
            Err(WordRead::Failed(e)) => return Err(e),
        }
    }

    let cause = last_idle.map(|e| e.to_string()).unwrap_or_default();
    Err(io::Error::new(
        ErrorKind::TimedOut,
        format!(
            "no acknowledgement after {} attempts: {}",
            ACK_READ_ATTEMPTS, cause
        ),
    ))
}
