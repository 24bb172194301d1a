//! Byte transport abstraction over the serial link
//!
//! The driver needs only three operations from the link: read, write, and
//! a count of buffered input bytes. Putting those behind a trait keeps the
//! sync and decode logic independent of `serialport`, so tests can drive
//! it from an in-memory buffer.

use std::io;
use std::time::Duration;

use serialport::SerialPort;

/// Baud rate the WT61PC ships with.
pub const BAUD_RATE: u32 = 9_600;

/// Read/write timeout for the serial port. Bounds every read so a silent
/// or unplugged device stalls for at most this long per attempt.
pub const PORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Byte-level access to the device link.
pub trait Transport {
    /// Read up to `buf.len()` bytes. `Ok(0)` means nothing arrived within
    /// the timeout window.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write all of `bytes` to the device.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Number of received bytes waiting in the input buffer.
    fn bytes_available(&mut self) -> io::Result<u32>;
}

/// Transport backed by a physical serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` at the fixed WT61PC parameters (9600 8N1, 1 s timeout).
    pub fn open(path: &str) -> serialport::Result<Self> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(PORT_TIMEOUT)
            .open()?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // A quiet line surfaces as a timeout; report it as an empty read.
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)
    }

    fn bytes_available(&mut self) -> io::Result<u32> {
        self.port.bytes_to_read().map_err(io::Error::from)
    }
}
