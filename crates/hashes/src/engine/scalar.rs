//! Scalar four-lane engine: shift-add recurrence, 16 fixed-position updates
//! per aligned block.

use super::{LaneKernel, hash_with};
use crate::align::AlignedSlice;
use crate::error::HashError;
use crate::lanes::{LANES, djb2_step};

pub(crate) struct Scalar;

impl LaneKernel for Scalar {
    const ALIGN: usize = 16;
    const BLOCK: usize = 16;

    #[inline]
    fn fold_blocks(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> usize {
        let blocks = body.blocks::<16>();
        let [mut s0, mut s1, mut s2, mut s3] = *lanes;

        for block in blocks {
            s0 = djb2_step(s0, block[0]);
            s1 = djb2_step(s1, block[1]);
            s2 = djb2_step(s2, block[2]);
            s3 = djb2_step(s3, block[3]);
            s0 = djb2_step(s0, block[4]);
            s1 = djb2_step(s1, block[5]);
            s2 = djb2_step(s2, block[6]);
            s3 = djb2_step(s3, block[7]);
            s0 = djb2_step(s0, block[8]);
            s1 = djb2_step(s1, block[9]);
            s2 = djb2_step(s2, block[10]);
            s3 = djb2_step(s3, block[11]);
            s0 = djb2_step(s0, block[12]);
            s1 = djb2_step(s1, block[13]);
            s2 = djb2_step(s2, block[14]);
            s3 = djb2_step(s3, block[15]);
        }

        *lanes = [s0, s1, s2, s3];
        blocks.len() * Self::BLOCK
    }
}

/// Hashes `buffer` with the alignment-aware unrolled scalar engine.
///
/// Produces exactly the digest of [`x4djbx33a_128_ref`](crate::x4djbx33a_128_ref)
/// for every input and every start address.
///
/// # Errors
///
/// Same validation failures as the reference engine; `out` is untouched on
/// error.
///
/// # Examples
///
/// ```
/// use hashes::{x4djbx33a_128_ref, x4djbx33a_128_scalar};
///
/// let data: Vec<u8> = (0..=255).collect();
/// let cookie = [0x5au8; 16];
/// let (mut a, mut b) = ([0u8; 16], [0u8; 16]);
/// x4djbx33a_128_ref(&data[3..], &cookie, &mut a).unwrap();
/// x4djbx33a_128_scalar(&data[3..], &cookie, &mut b).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn x4djbx33a_128_scalar(
    buffer: &[u8],
    cookie: &[u8],
    out: &mut [u8],
) -> Result<(), HashError> {
    hash_with::<Scalar>(buffer, cookie, out)
}
