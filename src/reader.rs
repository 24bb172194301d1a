//! Frame synchronization over an unstructured byte stream
//!
//! The device emits frames back to back, but the host may start listening
//! mid-frame and noise can corrupt bytes on the wire. Synchronization
//! scans forward for the 0x55 start marker, collects the rest of the
//! candidate, and validates it before handing it on.

use tracing::trace;

use crate::frame::{Frame, FRAME_SIZE, START_MARKER};
use crate::transport::Transport;

/// Pull the next validated frame out of the stream.
///
/// Scans byte by byte for the start marker, then reads the remaining ten
/// bytes. Returns `None` when the stream yields no data, runs dry
/// mid-frame, or the assembled candidate fails its checksum. None of
/// these is an error: garbled or interrupted streams (an unplugged cable,
/// a quiet line) are an expected operating condition on a serial link.
pub fn read_frame<T: Transport>(transport: &mut T) -> Option<Frame> {
    let mut byte = [0u8; 1];
    loop {
        match transport.read_bytes(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) if byte[0] == START_MARKER => break,
            // Mid-frame or noise byte, keep scanning.
            Ok(_) => continue,
        }
    }

    let mut buf = [0u8; FRAME_SIZE];
    buf[0] = START_MARKER;
    let mut filled = 1;
    while filled < FRAME_SIZE {
        match transport.read_bytes(&mut buf[filled..]) {
            // Stream ran dry before a full frame arrived.
            Ok(0) | Err(_) => return None,
            Ok(n) => filled += n,
        }
    }

    let frame = Frame::parse(buf);
    if frame.is_none() {
        trace!("discarding frame candidate with bad checksum");
    }
    frame
}
