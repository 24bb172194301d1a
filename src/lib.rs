//! Driver for the DFRobot WT61PC inertial measurement unit
//!
//! The WT61PC streams 11-byte telemetry frames over a 9600-baud serial
//! link. Each frame carries one measurement kind — acceleration, angular
//! rate, or orientation angle — as three little-endian 16-bit fields,
//! guarded by a fixed start marker and a modulo-256 checksum.
//!
//! This crate provides frame synchronization, checksum validation, and
//! decoding into physical units, plus [`Wt61Pc`], a polling device object
//! that caches the latest measurement of each kind.

pub mod checksum;
pub mod device;
pub mod frame;
pub mod measurement;
pub mod reader;
pub mod transport;

pub use checksum::{compute_checksum, verify_checksum_bytes};
pub use device::{Error, Wt61Pc, MAX_FREQUENCY_INDEX, POLL_THRESHOLD};
pub use frame::{Frame, FrameKind, FRAME_SIZE, START_MARKER};
pub use measurement::{Measurement, Vector3};
pub use reader::read_frame;
pub use transport::{SerialTransport, Transport};
