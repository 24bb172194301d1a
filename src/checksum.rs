//! Checksum computation for WT61PC frames
//!
//! The checksum is the sum of the first ten frame bytes, truncated to
//! eight bits. It is stored as the eleventh and final byte of the frame
//! and must match exactly for a frame to be accepted.

/// Compute the checksum over the data portion of a frame.
///
/// Returns the wrapping (modulo-256) sum of all bytes.
pub fn compute_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Verify that a frame's trailing checksum byte matches its contents.
///
/// The slice should include all bytes up to and including the checksum.
/// For a frame of N bytes, computes the sum of bytes 0..N-1 and compares
/// it against the final byte. Slices too short to hold any data are
/// rejected outright.
pub fn verify_checksum_bytes(frame: &[u8]) -> bool {
    match frame.split_last() {
        Some((&stored, data)) if !data.is_empty() => compute_checksum(data) == stored,
        _ => false,
    }
}
