//! Reference four-lane engine: one multiply per byte, no alignment tricks.
//!
//! Every other engine is measured against this one.

use super::{DIGEST_LEN_128, emit};
use crate::error::HashError;
use crate::lanes::{LANES, SEED};
use crate::params::validate_slices;

/// Hashes `buffer` with the byte-at-a-time reference recurrence.
///
/// Byte `i` updates lane `i % 4` as `lane * 33 + byte`. The first sixteen
/// cookie bytes are XORed into the little-endian lanes and the result is
/// written to `out[..16]`.
///
/// # Errors
///
/// Returns the validator's [`HashError`] when `out` is shorter than 16
/// bytes, overlaps `buffer`, or `cookie` is shorter than 16 bytes. `out` is
/// untouched on error.
///
/// # Examples
///
/// ```
/// use hashes::x4djbx33a_128_ref;
///
/// let mut out = [0u8; 16];
/// x4djbx33a_128_ref(b"A", &[0u8; 16], &mut out).unwrap();
/// assert_eq!(&out[..4], &177_638u32.to_le_bytes());
/// assert_eq!(&out[4..8], &5381u32.to_le_bytes());
/// ```
pub fn x4djbx33a_128_ref(buffer: &[u8], cookie: &[u8], out: &mut [u8]) -> Result<(), HashError> {
    validate_slices(DIGEST_LEN_128, buffer, cookie, out)?;
    emit(&reference_lanes(buffer), cookie, out);
    Ok(())
}

pub(crate) fn reference_lanes(buffer: &[u8]) -> [u32; LANES] {
    let mut lanes = [SEED; LANES];
    for (index, &byte) in buffer.iter().enumerate() {
        let lane = &mut lanes[index % LANES];
        *lane = lane.wrapping_mul(33).wrapping_add(u32::from(byte));
    }
    lanes
}
