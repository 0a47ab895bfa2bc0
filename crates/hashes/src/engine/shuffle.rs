//! Wide-shuffle four-lane engine.
//!
//! A single byte shuffle regroups an aligned 16-byte block so that dword `j`
//! holds the four bytes destined for lane `j`, in input order. Round `r`
//! then isolates byte `r` of every dword with a shift and a `0xff` mask.
//! x86 needs SSSE3 for the shuffle; aarch64 uses a NEON table lookup.

use super::{LaneKernel, hash_with};
use crate::align::AlignedSlice;
use crate::error::HashError;
use crate::lanes::LANES;

/// Source byte for each destination byte of the regrouping shuffle.
#[cfg_attr(
    not(all(feature = "simd", target_arch = "aarch64")),
    allow(dead_code)
)]
const LANE_GATHER: [u8; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];

pub(crate) struct Shuffle;

impl LaneKernel for Shuffle {
    const ALIGN: usize = 16;
    const BLOCK: usize = 16;

    #[inline]
    fn fold_blocks(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> usize {
        fold_arch(lanes, body).unwrap_or(0)
    }
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
fn fold_arch(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> Option<usize> {
    x86::try_fold(lanes, body)
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[inline]
fn fold_arch(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> Option<usize> {
    neon::try_fold(lanes, body)
}

#[cfg(not(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
#[inline]
fn fold_arch(_lanes: &mut [u32; LANES], _body: AlignedSlice<'_>) -> Option<usize> {
    None
}

/// Hashes `buffer` with the shuffle engine.
pub(crate) fn x4djbx33a_128_shuffle(
    buffer: &[u8],
    cookie: &[u8],
    out: &mut [u8],
) -> Result<(), HashError> {
    hash_with::<Shuffle>(buffer, cookie, out)
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
mod x86 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{
        __m128i, _mm_and_si128, _mm_load_si128, _mm_loadu_si128, _mm_set_epi8, _mm_set1_epi32,
        _mm_shuffle_epi8, _mm_srli_epi32, _mm_storeu_si128,
    };
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{
        __m128i, _mm_and_si128, _mm_load_si128, _mm_loadu_si128, _mm_set_epi8, _mm_set1_epi32,
        _mm_shuffle_epi8, _mm_srli_epi32, _mm_storeu_si128,
    };

    use crate::align::AlignedSlice;
    use crate::engine::medium::x86::round;
    use crate::lanes::LANES;
    use crate::registry::capabilities;

    #[inline]
    pub(super) fn try_fold(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> Option<usize> {
        if !capabilities().ssse3() {
            return None;
        }
        let blocks = body.blocks::<16>();
        // SAFETY: SSSE3 (and with it SSE2) was detected and every block
        // starts on a 16-byte boundary.
        unsafe { fold_ssse3(lanes, blocks) };
        Some(blocks.len() * 16)
    }

    #[target_feature(enable = "sse2,ssse3")]
    unsafe fn fold_ssse3(lanes: &mut [u32; LANES], blocks: &[[u8; 16]]) {
        let gather = _mm_set_epi8(15, 11, 7, 3, 14, 10, 6, 2, 13, 9, 5, 1, 12, 8, 4, 0);
        let low_byte = _mm_set1_epi32(0xff);
        let mut state = _mm_loadu_si128(lanes.as_ptr().cast::<__m128i>());

        for block in blocks {
            let input = _mm_load_si128(block.as_ptr().cast::<__m128i>());
            let grouped = _mm_shuffle_epi8(input, gather);
            state = round(state, _mm_and_si128(grouped, low_byte));
            state = round(state, _mm_and_si128(_mm_srli_epi32::<8>(grouped), low_byte));
            state = round(state, _mm_and_si128(_mm_srli_epi32::<16>(grouped), low_byte));
            state = round(state, _mm_srli_epi32::<24>(grouped));
        }

        _mm_storeu_si128(lanes.as_mut_ptr().cast::<__m128i>(), state);
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
mod neon {
    use core::arch::aarch64::{
        vandq_u32, vdupq_n_u32, vld1q_u8, vld1q_u32, vqtbl1q_u8, vreinterpretq_u32_u8,
        vshrq_n_u32, vst1q_u32,
    };

    use super::LANE_GATHER;
    use crate::align::AlignedSlice;
    use crate::engine::medium::neon::round;
    use crate::lanes::LANES;
    use crate::registry::capabilities;

    #[inline]
    pub(super) fn try_fold(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> Option<usize> {
        if !capabilities().neon() {
            return None;
        }
        let blocks = body.blocks::<16>();
        // SAFETY: NEON was detected; loads stay within each 16-byte block.
        unsafe { fold_neon(lanes, blocks) };
        Some(blocks.len() * 16)
    }

    #[target_feature(enable = "neon")]
    unsafe fn fold_neon(lanes: &mut [u32; LANES], blocks: &[[u8; 16]]) {
        let gather = vld1q_u8(LANE_GATHER.as_ptr());
        let low_byte = vdupq_n_u32(0xff);
        let mut state = vld1q_u32(lanes.as_ptr());

        for block in blocks {
            let input = vld1q_u8(block.as_ptr());
            let grouped = vreinterpretq_u32_u8(vqtbl1q_u8(input, gather));
            state = round(state, vandq_u32(grouped, low_byte));
            state = round(state, vandq_u32(vshrq_n_u32::<8>(grouped), low_byte));
            state = round(state, vandq_u32(vshrq_n_u32::<16>(grouped), low_byte));
            state = round(state, vshrq_n_u32::<24>(grouped));
        }

        vst1q_u32(lanes.as_mut_ptr(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::LANE_GATHER;

    #[test]
    fn gather_table_groups_bytes_by_lane() {
        for (dest, &src) in LANE_GATHER.iter().enumerate() {
            let lane = dest / 4;
            let round = dest % 4;
            assert_eq!(usize::from(src), round * 4 + lane);
        }
    }
}
