//! Frame layout and classification for the WT61PC wire protocol
//!
//! Every frame is exactly 11 bytes:
//!
//! ```text
//! byte    0      1       2     3      4     5      6     7      8   9   10
//!       start  header  X-lo  X-hi   Y-lo  Y-hi   Z-lo  Z-hi   res res  checksum
//! ```
//!
//! The start byte is always 0x55. The header byte identifies which
//! measurement the three little-endian 16-bit fields carry. Bytes 8 and 9
//! are reserved by the device and never interpreted.

use crate::checksum::verify_checksum_bytes;

/// Start marker preceding every frame.
pub const START_MARKER: u8 = 0x55;

/// Number of bytes in a complete frame.
pub const FRAME_SIZE: usize = 11;

/// Header byte constants for the recognized frame kinds.
pub mod header {
    pub const ACCELERATION: u8 = 0x51;
    pub const ANGULAR_RATE: u8 = 0x52;
    pub const ANGLE: u8 = 0x53;
}

/// Measurement kind carried by a frame, determined solely by its header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Acceleration,
    AngularRate,
    Angle,
    /// Structurally valid frame whose header maps to no known measurement.
    Unknown,
}

impl FrameKind {
    pub fn from_header(header: u8) -> Self {
        match header {
            header::ACCELERATION => FrameKind::Acceleration,
            header::ANGULAR_RATE => FrameKind::AngularRate,
            header::ANGLE => FrameKind::Angle,
            _ => FrameKind::Unknown,
        }
    }
}

/// A validated 11-byte frame.
///
/// Construction goes through [`parse`](Self::parse), so holding a `Frame`
/// means the start marker and checksum have already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_SIZE],
}

impl Frame {
    /// Validate a candidate buffer: start marker plus checksum.
    ///
    /// Returns `None` for anything malformed. A frame failing either check
    /// is discarded whole, never partially applied.
    pub fn parse(bytes: [u8; FRAME_SIZE]) -> Option<Self> {
        if bytes[0] != START_MARKER {
            return None;
        }
        if !verify_checksum_bytes(&bytes) {
            return None;
        }
        Some(Self { bytes })
    }

    /// The raw header byte.
    pub fn header(&self) -> u8 {
        self.bytes[1]
    }

    /// The measurement kind this frame carries.
    pub fn kind(&self) -> FrameKind {
        FrameKind::from_header(self.header())
    }

    /// The X/Y/Z payload fields as signed little-endian words.
    ///
    /// Acceleration and angular-rate frames encode their fields in
    /// two's complement.
    pub fn fields_i16(&self) -> [i16; 3] {
        [0, 1, 2].map(|axis| i16::from_le_bytes(self.field(axis)))
    }

    /// The X/Y/Z payload fields as unsigned little-endian words.
    ///
    /// Angle frames use the unsigned interpretation.
    pub fn fields_u16(&self) -> [u16; 3] {
        [0, 1, 2].map(|axis| u16::from_le_bytes(self.field(axis)))
    }

    fn field(&self, axis: usize) -> [u8; 2] {
        let offset = 2 + axis * 2;
        [self.bytes[offset], self.bytes[offset + 1]]
    }
}
