use std::io::{self, ErrorKind, Read, Write};
use tracing::{debug, warn};

/// Byte link to the firmware under test.
pub trait Link {
    /// Write a whole chunk, returning how many bytes went out.
    ///
    /// Returns fewer bytes than `buf.len()` only when the port stalled.
    fn write_chunk(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Single read, as `Read::read`.
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// `Link` over anything readable and writable, such as a serial port.
#[derive(Debug)]
pub struct PortLink<P> {
    port: P,
}

impl<P> PortLink<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P: Read + Write> Link for PortLink<P> {
    fn write_chunk(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            match self.port.write(&buf[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    warn!(
                        written = written,
                        expected = buf.len(),
                        "Serial write timed out"
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        self.port.flush()?;
        debug!(bytes_written = written, "Chunk written");
        Ok(written)
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::io::Cursor;

    mock! {
        pub Link {}

        impl Link for Link {
            fn write_chunk(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;
        }
    }

    /// Accepts at most `limit` bytes per write, then times out.
    struct StallingPort {
        limit: usize,
        accepted: Vec<u8>,
    }

    impl Read for StallingPort {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for StallingPort {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted.len() >= self.limit {
                return Err(io::Error::from(ErrorKind::TimedOut));
            }
            let n = buf.len().min(self.limit - self.accepted.len()).min(3);
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_chunk_loops_over_partial_writes() -> io::Result<()> {
        let mut link = PortLink::new(StallingPort {
            limit: usize::MAX,
            accepted: Vec::new(),
        });
        assert_eq!(link.write_chunk(b"hello world\n")?, 12);
        assert_eq!(link.into_inner().accepted, b"hello world\n");
        Ok(())
    }

    #[test]
    fn test_write_chunk_reports_stall_as_short_write() -> io::Result<()> {
        let mut link = PortLink::new(StallingPort {
            limit: 5,
            accepted: Vec::new(),
        });
        assert_eq!(link.write_chunk(b"hello world\n")?, 5);
        Ok(())
    }

    #[test]
    fn test_read_some_passes_through() -> io::Result<()> {
        let mut link = PortLink::new(Cursor::new(vec![1u8, 2, 3]));
        let mut buf = [0u8; 2];
        assert_eq!(link.read_some(&mut buf)?, 2);
        assert_eq!(buf, [1, 2]);
        Ok(())
    }
}

#[cfg(test)]
pub use tests::MockLink;
