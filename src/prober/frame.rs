use crc::{Crc, CRC_32_ISO_HDLC};
use tracing::debug;

/// Line terminator closing every chunk on the wire.
pub const TERMINATOR: u8 = b'\n';

/// CRC-32 as used by zlib and Ethernet (IEEE polynomial, reflected).
pub const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

pub fn checksum(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// A terminated chunk ready to be written, with its checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
    crc: u32,
}

impl Frame {
    /// Remap payload bytes that collide with the terminator to 0 and append it.
    pub fn new(mut payload: Vec<u8>) -> Self {
        for b in payload.iter_mut() {
            if *b == TERMINATOR {
                *b = 0;
            }
        }
        payload.push(TERMINATOR);
        let crc = checksum(&payload);
        debug!(len = payload.len(), crc = crc, "Frame built");
        Self {
            bytes: payload,
            crc,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_checksum() {
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_terminator_collisions_are_zeroed() {
        let frame = Frame::new(vec![1, b'\n', 2, b'\n']);
        assert_eq!(frame.bytes(), &[1, 0, 2, 0, b'\n']);
        assert_eq!(frame.crc(), checksum(&[1, 0, 2, 0, b'\n']));
    }

    #[test]
    fn test_empty_payload_is_only_terminator() {
        let frame = Frame::new(Vec::new());
        assert_eq!(frame.bytes(), &[TERMINATOR]);
        assert_eq!(frame.len(), 1);
    }
}
