//! Narrow four-lane engine: 8-byte blocks folded into two 64-bit registers.
//!
//! Register `pair01` carries lanes 0 and 1 (low and high 32 bits), `pair23`
//! carries lanes 2 and 3. Each 8-byte load is split into two 4-byte halves,
//! and every half is spread so its bytes land in the low byte of their lane.
//! Lane arithmetic is done SWAR-style: shifts are masked and additions
//! suppress the carry out of bit 31 so the two lanes never bleed into each
//! other.

use super::{LaneKernel, hash_with};
use crate::align::AlignedSlice;
use crate::error::HashError;
use crate::lanes::LANES;

/// Bit 31 of each 32-bit lane.
const LANE_TOP_BITS: u64 = 0x8000_0000_8000_0000;
/// Bits that survive a per-lane left shift by five.
const SHL5_KEEP: u64 = 0xffff_ffe0_ffff_ffe0;

pub(crate) struct Narrow;

impl LaneKernel for Narrow {
    const ALIGN: usize = 8;
    const BLOCK: usize = 8;

    #[inline]
    fn fold_blocks(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> usize {
        let blocks = body.blocks::<8>();
        let mut pair01 = pack(lanes[0], lanes[1]);
        let mut pair23 = pack(lanes[2], lanes[3]);

        for block in blocks {
            let word = u64::from_le_bytes(*block);
            for half in [word as u32, (word >> 32) as u32] {
                let [bytes01, bytes23] = spread(half);
                pair01 = round(pair01, bytes01);
                pair23 = round(pair23, bytes23);
            }
        }

        let (s0, s1) = unpack(pair01);
        let (s2, s3) = unpack(pair23);
        *lanes = [s0, s1, s2, s3];
        blocks.len() * Self::BLOCK
    }
}

#[inline(always)]
const fn pack(low: u32, high: u32) -> u64 {
    (low as u64) | ((high as u64) << 32)
}

#[inline(always)]
const fn unpack(pair: u64) -> (u32, u32) {
    (pair as u32, (pair >> 32) as u32)
}

/// Spreads bytes `b0 b1 b2 b3` into `[b0 | b1 << 32, b2 | b3 << 32]`.
#[inline(always)]
const fn spread(half: u32) -> [u64; 2] {
    [
        pack(half & 0xff, (half >> 8) & 0xff),
        pack((half >> 16) & 0xff, half >> 24),
    ]
}

/// Lane-wise wrapping addition of two packed pairs.
#[inline(always)]
const fn add_lanes(a: u64, b: u64) -> u64 {
    ((a & !LANE_TOP_BITS).wrapping_add(b & !LANE_TOP_BITS)) ^ ((a ^ b) & LANE_TOP_BITS)
}

/// `state * 33 + bytes` on both lanes of a pair.
#[inline(always)]
const fn round(state: u64, bytes: u64) -> u64 {
    let sum = add_lanes(bytes, state);
    add_lanes((state << 5) & SHL5_KEEP, sum)
}

/// Hashes `buffer` with the narrow engine.
pub(crate) fn x4djbx33a_128_narrow(
    buffer: &[u8],
    cookie: &[u8],
    out: &mut [u8],
) -> Result<(), HashError> {
    hash_with::<Narrow>(buffer, cookie, out)
}
