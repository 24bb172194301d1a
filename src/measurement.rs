//! Unit conversion for WT61PC measurements
//!
//! Converts raw 16-bit field values to physical units. All three kinds
//! share the same 32768-count full scale; they differ in the full-scale
//! range and in whether the raw value is read as signed or unsigned.

use crate::frame::{Frame, FrameKind};

/// Counts at full scale for every measurement kind.
pub const FULL_SCALE: f64 = 32768.0;

/// Acceleration full-scale range: ±16 g at g = 9.8 m/s².
pub const ACCEL_SCALE: f64 = 16.0 * 9.8;

/// Angular-rate full-scale range in degrees/second.
pub const GYRO_SCALE: f64 = 2000.0;

/// Angle full-scale range in degrees.
pub const ANGLE_SCALE: f64 = 180.0;

/// Three-axis measurement vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Convert signed raw counts at the given full-scale range.
    pub fn from_signed_counts([x, y, z]: [i16; 3], scale: f64) -> Self {
        Self {
            x: (x as f64) / FULL_SCALE * scale,
            y: (y as f64) / FULL_SCALE * scale,
            z: (z as f64) / FULL_SCALE * scale,
        }
    }

    /// Convert unsigned raw counts at the given full-scale range.
    pub fn from_unsigned_counts([x, y, z]: [u16; 3], scale: f64) -> Self {
        Self {
            x: (x as f64) / FULL_SCALE * scale,
            y: (y as f64) / FULL_SCALE * scale,
            z: (z as f64) / FULL_SCALE * scale,
        }
    }
}

/// A decoded measurement, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Acceleration in m/s².
    Acceleration(Vector3),
    /// Angular rate in degrees/second.
    AngularRate(Vector3),
    /// Orientation angle in degrees.
    Angle(Vector3),
}

impl Measurement {
    /// Decode a validated frame into physical units.
    ///
    /// Returns `None` for frames whose header maps to no known measurement.
    /// Angle frames read their fields unsigned, matching the device's own
    /// documentation; this gives a 0..360-style wrap rather than ±180.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match frame.kind() {
            FrameKind::Acceleration => Some(Measurement::Acceleration(
                Vector3::from_signed_counts(frame.fields_i16(), ACCEL_SCALE),
            )),
            FrameKind::AngularRate => Some(Measurement::AngularRate(
                Vector3::from_signed_counts(frame.fields_i16(), GYRO_SCALE),
            )),
            FrameKind::Angle => Some(Measurement::Angle(Vector3::from_unsigned_counts(
                frame.fields_u16(),
                ANGLE_SCALE,
            ))),
            FrameKind::Unknown => None,
        }
    }
}
