//! WT61PC device object
//!
//! Owns the serial transport and the latest decoded measurement of each
//! kind. The caller polls [`available`](Wt61Pc::available) on its own
//! cadence (10 ms works well) and reads the cached vectors through the
//! accessors whenever it likes.

use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::measurement::{Measurement, Vector3};
use crate::reader::read_frame;
use crate::transport::{SerialTransport, Transport};

/// Buffered bytes required before a poll cycle runs (four frames' worth).
///
/// Waiting for a backlog trades roughly one polling interval of latency
/// for far fewer short reads against the port.
pub const POLL_THRESHOLD: u32 = 44;

/// Frames attempted per poll cycle.
const FRAMES_PER_POLL: usize = 4;

/// Leading bytes of the frequency-select command.
const FREQ_COMMAND: [u8; 3] = [0xFF, 0xAA, 0x03];

/// Highest valid frequency index accepted by the device.
pub const MAX_FREQUENCY_INDEX: u8 = 11;

/// Errors from the command and construction paths.
///
/// The read/decode path never produces errors; sync failures, checksum
/// mismatches, and unknown frames all degrade to "no update this cycle".
#[derive(Error, Debug)]
pub enum Error {
    /// The serial port never opened, so there is nothing to write to.
    #[error("device is not connected")]
    NotConnected,

    /// Frequency index outside the device's accepted range.
    #[error("frequency index {0} out of range (0..={MAX_FREQUENCY_INDEX})")]
    FrequencyOutOfRange(u8),

    /// Write failed while sending a command.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Driver for the DFRobot WT61PC inertial measurement unit.
///
/// # Example
///
/// ```no_run
/// use std::thread;
/// use std::time::Duration;
/// use wt61pc::Wt61Pc;
///
/// let mut imu = Wt61Pc::open("/dev/ttyUSB0");
/// loop {
///     if imu.available() {
///         let a = imu.accel();
///         println!("accel: {:.3} {:.3} {:.3}", a.x, a.y, a.z);
///     }
///     thread::sleep(Duration::from_millis(10));
/// }
/// ```
pub struct Wt61Pc<T = SerialTransport> {
    transport: Option<T>,
    accel: Vector3,
    gyro: Vector3,
    angle: Vector3,
}

impl Wt61Pc<SerialTransport> {
    /// Open the device on a serial port path (`/dev/ttyUSB0`, `COM6`).
    ///
    /// A port that fails to open is logged and recorded as absent; the
    /// device still constructs, and [`available`](Self::available) reports
    /// false from then on. Transient link problems are the normal operating
    /// condition for this sensor, so construction never fails outright.
    pub fn open(path: &str) -> Self {
        let transport = match SerialTransport::open(path) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("failed to open {}: {}", path, e);
                None
            }
        };
        Self::with_transport(transport)
    }
}

impl<T: Transport> Wt61Pc<T> {
    /// Build a device over an already-open transport.
    pub fn from_transport(transport: T) -> Self {
        Self::with_transport(Some(transport))
    }

    fn with_transport(transport: Option<T>) -> Self {
        Self {
            transport,
            accel: Vector3::ZERO,
            gyro: Vector3::ZERO,
            angle: Vector3::ZERO,
        }
    }

    /// Whether the underlying port opened successfully.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Latest acceleration in m/s², zero before the first decode.
    pub fn accel(&self) -> Vector3 {
        self.accel
    }

    /// Latest angular rate in degrees/second, zero before the first decode.
    pub fn gyro(&self) -> Vector3 {
        self.gyro
    }

    /// Latest orientation angle in degrees, zero before the first decode.
    pub fn angle(&self) -> Vector3 {
        self.angle
    }

    /// Run one poll cycle if enough bytes have accumulated.
    ///
    /// Returns false when the port is absent, errored, or holds fewer than
    /// [`POLL_THRESHOLD`] buffered bytes. Otherwise runs the read/decode
    /// pipeline up to four times, applying each recognized frame to the
    /// cached state, and returns true.
    ///
    /// True means "an update cycle ran", not "a frame decoded": a cycle
    /// where every read was garbage still returns true. Callers that need
    /// to know whether fresh data arrived should compare accessor values
    /// across calls.
    pub fn available(&mut self) -> bool {
        let waiting = match self.transport.as_mut() {
            None => return false,
            Some(transport) => match transport.bytes_available() {
                Ok(n) => n,
                Err(e) => {
                    debug!("failed to query input buffer: {}", e);
                    return false;
                }
            },
        };
        if waiting < POLL_THRESHOLD {
            return false;
        }

        for _ in 0..FRAMES_PER_POLL {
            let Some(transport) = self.transport.as_mut() else {
                break;
            };
            let measurement =
                read_frame(transport).and_then(|frame| Measurement::from_frame(&frame));
            if let Some(measurement) = measurement {
                self.apply(measurement);
            }
        }
        true
    }

    /// Sole mutation site for the cached vectors.
    fn apply(&mut self, measurement: Measurement) {
        match measurement {
            Measurement::Acceleration(v) => self.accel = v,
            Measurement::AngularRate(v) => self.gyro = v,
            Measurement::Angle(v) => self.angle = v,
        }
    }

    /// Command the device's output data rate.
    ///
    /// `index` selects one of twelve rates (0 through 11); out-of-range
    /// values are rejected before any bytes hit the wire. Success reflects
    /// range validation and the write, not device acknowledgment — the
    /// WT61PC sends no reply to commands.
    pub fn set_frequency(&mut self, index: u8) -> Result<(), Error> {
        if index > MAX_FREQUENCY_INDEX {
            return Err(Error::FrequencyOutOfRange(index));
        }
        let transport = self.transport.as_mut().ok_or(Error::NotConnected)?;

        let command = [FREQ_COMMAND[0], FREQ_COMMAND[1], FREQ_COMMAND[2], index, 0x00];
        transport.write_bytes(&command)?;
        debug!("frequency index set to {}", index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::compute_checksum;
    use crate::transport::mock::MockTransport;
    use approx::assert_relative_eq;

    fn frame_bytes(header: u8, fields: [i16; 3]) -> [u8; 11] {
        let mut bytes = [0u8; 11];
        bytes[0] = 0x55;
        bytes[1] = header;
        for (axis, value) in fields.iter().enumerate() {
            bytes[2 + axis * 2..4 + axis * 2].copy_from_slice(&value.to_le_bytes());
        }
        bytes[8] = 0x78;
        bytes[9] = 0x08;
        bytes[10] = compute_checksum(&bytes[..10]);
        bytes
    }

    fn device_with_stream(stream: &[u8]) -> Wt61Pc<MockTransport> {
        Wt61Pc::from_transport(MockTransport::new(stream))
    }

    #[test]
    fn test_state_zero_initialized() {
        let dev = device_with_stream(&[]);
        assert_eq!(dev.accel(), Vector3::ZERO);
        assert_eq!(dev.gyro(), Vector3::ZERO);
        assert_eq!(dev.angle(), Vector3::ZERO);
    }

    #[test]
    fn test_available_false_below_threshold() {
        // 43 buffered bytes is one short of the four-frame threshold.
        let mut dev = device_with_stream(&[0u8; 43]);
        assert!(!dev.available());
    }

    #[test]
    fn test_available_false_without_transport() {
        let mut dev: Wt61Pc<MockTransport> = Wt61Pc::with_transport(None);
        assert!(!dev.available());
        assert!(!dev.is_connected());
    }

    #[test]
    fn test_poll_decodes_all_three_kinds() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&frame_bytes(0x51, [-32768, 0, 0]));
        stream.extend_from_slice(&frame_bytes(0x52, [16384, 0, 0]));
        stream.extend_from_slice(&frame_bytes(0x53, [0, 16384, 0]));
        stream.extend_from_slice(&frame_bytes(0x54, [1, 2, 3]));
        let mut dev = device_with_stream(&stream);

        assert!(dev.available());
        assert_eq!(dev.accel().x, -156.8);
        assert_relative_eq!(dev.gyro().x, 1000.0, epsilon = 1e-12);
        assert_relative_eq!(dev.angle().y, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_accel_scenario() {
        // 55 51 00 80 00 00 00 00 78 08 plus its computed checksum:
        // X raw is -32768 signed, which maps exactly to -156.8 m/s².
        let frame = frame_bytes(0x51, [-32768, 0, 0]);
        assert_eq!(&frame[..4], &[0x55, 0x51, 0x00, 0x80]);

        let mut stream = frame.to_vec();
        stream.resize(POLL_THRESHOLD as usize, 0x00);
        let mut dev = device_with_stream(&stream);

        assert!(dev.available());
        assert_eq!(dev.accel().x, -156.8);
        assert_eq!(dev.accel().y, 0.0);
        assert_eq!(dev.accel().z, 0.0);
    }

    #[test]
    fn test_unknown_frames_change_nothing() {
        let mut stream = Vec::new();
        for _ in 0..4 {
            stream.extend_from_slice(&frame_bytes(0x54, [100, 200, 300]));
        }
        let mut dev = device_with_stream(&stream);

        assert!(dev.available());
        assert_eq!(dev.accel(), Vector3::ZERO);
        assert_eq!(dev.gyro(), Vector3::ZERO);
        assert_eq!(dev.angle(), Vector3::ZERO);
    }

    // Deliberate contract choice: true means "an update cycle ran", not
    // "a valid frame arrived". Preserved from the device's established
    // behavior; tightening it would break callers that use the return
    // value purely as a pacing signal.
    #[test]
    fn test_available_true_even_when_all_frames_garbage() {
        let mut stream = Vec::new();
        for _ in 0..4 {
            let mut corrupt = frame_bytes(0x51, [1000, 2000, 3000]);
            corrupt[10] = corrupt[10].wrapping_add(1);
            stream.extend_from_slice(&corrupt);
        }
        let mut dev = device_with_stream(&stream);

        assert!(dev.available());
        assert_eq!(dev.accel(), Vector3::ZERO);
    }

    #[test]
    fn test_corrupt_frames_leave_prior_state() {
        let mut stream = frame_bytes(0x51, [16384, 0, 0]).to_vec();
        stream.resize(POLL_THRESHOLD as usize, 0x00);
        let mut dev = device_with_stream(&stream);
        assert!(dev.available());
        let before = dev.accel();
        assert_relative_eq!(before.x, 78.4, epsilon = 1e-12);

        // Feed a second backlog of checksum-corrupt frames.
        let transport = dev.transport.as_mut().unwrap();
        for _ in 0..4 {
            let mut corrupt = frame_bytes(0x51, [0, 0, 0]);
            corrupt[10] = corrupt[10].wrapping_add(1);
            transport.rx.extend(corrupt);
        }

        assert!(dev.available());
        assert_eq!(dev.accel(), before);
    }

    #[test]
    fn test_accessors_idempotent_between_polls() {
        let mut stream = frame_bytes(0x52, [100, -100, 50]).to_vec();
        stream.resize(POLL_THRESHOLD as usize, 0x00);
        let mut dev = device_with_stream(&stream);
        assert!(dev.available());

        let first = dev.gyro();
        let second = dev.gyro();
        assert_eq!(first, second);

        // Stream is drained, so the next poll defers and changes nothing.
        assert!(!dev.available());
        assert_eq!(dev.gyro(), first);
    }

    #[test]
    fn test_set_frequency_writes_command() {
        let mut dev = device_with_stream(&[]);
        dev.set_frequency(5).unwrap();
        assert_eq!(
            dev.transport.as_ref().unwrap().tx,
            vec![0xFF, 0xAA, 0x03, 0x05, 0x00]
        );
    }

    #[test]
    fn test_set_frequency_rejects_out_of_range() {
        let mut dev = device_with_stream(&[]);
        let err = dev.set_frequency(12).unwrap_err();
        assert!(matches!(err, Error::FrequencyOutOfRange(12)));
        // Rejected before any I/O: nothing reached the wire.
        assert!(dev.transport.as_ref().unwrap().tx.is_empty());
    }

    #[test]
    fn test_set_frequency_without_transport() {
        let mut dev: Wt61Pc<MockTransport> = Wt61Pc::with_transport(None);
        assert!(matches!(dev.set_frequency(0), Err(Error::NotConnected)));
    }
}
