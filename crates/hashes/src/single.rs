//! Single-accumulator djbx33a with a 4-byte digest.
//!
//! Shares the validator and cookie contract with the four-lane family; only
//! the first four cookie bytes matter.

use crate::align::split_aligned;
use crate::cookie::mix_single;
use crate::error::HashError;
use crate::lanes::{SEED, djb2_step};
use crate::params::validate_slices;

/// Digest width of the single-lane family in bytes.
pub const DIGEST_LEN_32: usize = 4;

const FAST_ALIGN: usize = 16;

/// Hashes `buffer` with one accumulator, one multiply per byte.
///
/// # Errors
///
/// Returns [`HashError`] when `out` or `cookie` is shorter than four bytes,
/// or `out` overlaps `buffer`.
///
/// # Examples
///
/// ```
/// use hashes::djbx33a_32_ref;
///
/// let mut out = [0u8; 4];
/// djbx33a_32_ref(b"hello", &[0u8; 4], &mut out).unwrap();
/// assert_eq!(u32::from_le_bytes(out), 0x0f92_3099);
/// ```
pub fn djbx33a_32_ref(buffer: &[u8], cookie: &[u8], out: &mut [u8]) -> Result<(), HashError> {
    validate_slices(DIGEST_LEN_32, buffer, cookie, out)?;
    let state = buffer
        .iter()
        .fold(SEED, |state, &byte| state.wrapping_mul(33).wrapping_add(u32::from(byte)));
    out[..DIGEST_LEN_32].copy_from_slice(&mix_single(state, cookie));
    Ok(())
}

/// Hashes `buffer` with one accumulator, unrolled over aligned 16-byte blocks.
///
/// Bit-identical to [`djbx33a_32_ref`] for every input.
///
/// # Errors
///
/// Same as [`djbx33a_32_ref`].
pub fn djbx33a_32_scalar(buffer: &[u8], cookie: &[u8], out: &mut [u8]) -> Result<(), HashError> {
    validate_slices(DIGEST_LEN_32, buffer, cookie, out)?;

    let split = split_aligned(buffer, FAST_ALIGN);
    let mut state = split.prefix.iter().fold(SEED, |s, &b| djb2_step(s, b));
    for block in split.aligned.blocks::<FAST_ALIGN>() {
        state = fold_block(state, block);
    }
    for &byte in split.aligned.tail::<FAST_ALIGN>() {
        state = djb2_step(state, byte);
    }

    out[..DIGEST_LEN_32].copy_from_slice(&mix_single(state, cookie));
    Ok(())
}

#[inline(always)]
const fn fold_block(mut s: u32, b: &[u8; FAST_ALIGN]) -> u32 {
    s = djb2_step(s, b[0]);
    s = djb2_step(s, b[1]);
    s = djb2_step(s, b[2]);
    s = djb2_step(s, b[3]);
    s = djb2_step(s, b[4]);
    s = djb2_step(s, b[5]);
    s = djb2_step(s, b[6]);
    s = djb2_step(s, b[7]);
    s = djb2_step(s, b[8]);
    s = djb2_step(s, b[9]);
    s = djb2_step(s, b[10]);
    s = djb2_step(s, b[11]);
    s = djb2_step(s, b[12]);
    s = djb2_step(s, b[13]);
    s = djb2_step(s, b[14]);
    djb2_step(s, b[15])
}
