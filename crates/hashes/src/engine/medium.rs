//! Medium four-lane engine: one 128-bit register holds all four lanes.
//!
//! Each aligned 16-byte block is widened byte to word to dword by unpacking
//! against zero, which yields four vectors whose dword `j` is the byte for
//! lane `j`. Four rounds of `state = (state << 5) + (bytes + state)` fold the
//! block. On x86 the kernel needs SSE2, on aarch64 NEON; without the `simd`
//! feature, or on any other target, the kernel folds nothing and the
//! registry reports the engine unavailable.

use super::{LaneKernel, hash_with};
use crate::align::AlignedSlice;
use crate::error::HashError;
use crate::lanes::LANES;

pub(crate) struct Medium;

impl LaneKernel for Medium {
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

/// Hashes `buffer` with the medium engine.
///
/// Callers go through the registry, which only hands this engine out when
/// the CPU supports it.
pub(crate) fn x4djbx33a_128_medium(
    buffer: &[u8],
    cookie: &[u8],
    out: &mut [u8],
) -> Result<(), HashError> {
    hash_with::<Medium>(buffer, cookie, out)
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
pub(super) mod x86 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{
        __m128i, _mm_add_epi32, _mm_load_si128, _mm_loadu_si128, _mm_setzero_si128,
        _mm_slli_epi32, _mm_storeu_si128, _mm_unpackhi_epi8, _mm_unpackhi_epi16,
        _mm_unpacklo_epi8, _mm_unpacklo_epi16,
    };
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{
        __m128i, _mm_add_epi32, _mm_load_si128, _mm_loadu_si128, _mm_setzero_si128,
        _mm_slli_epi32, _mm_storeu_si128, _mm_unpackhi_epi8, _mm_unpackhi_epi16,
        _mm_unpacklo_epi8, _mm_unpacklo_epi16,
    };

    use crate::align::AlignedSlice;
    use crate::lanes::LANES;
    use crate::registry::capabilities;

    #[inline]
    pub(super) fn try_fold(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> Option<usize> {
        if !capabilities().sse2() {
            return None;
        }
        let blocks = body.blocks::<16>();
        // SAFETY: SSE2 was detected and every block starts on a 16-byte boundary.
        unsafe { fold_sse2(lanes, blocks) };
        Some(blocks.len() * 16)
    }

    #[target_feature(enable = "sse2")]
    unsafe fn fold_sse2(lanes: &mut [u32; LANES], blocks: &[[u8; 16]]) {
        let zero = _mm_setzero_si128();
        let mut state = _mm_loadu_si128(lanes.as_ptr().cast::<__m128i>());

        for block in blocks {
            let input = _mm_load_si128(block.as_ptr().cast::<__m128i>());
            let words_lo = _mm_unpacklo_epi8(input, zero);
            let words_hi = _mm_unpackhi_epi8(input, zero);
            state = round(state, _mm_unpacklo_epi16(words_lo, zero));
            state = round(state, _mm_unpackhi_epi16(words_lo, zero));
            state = round(state, _mm_unpacklo_epi16(words_hi, zero));
            state = round(state, _mm_unpackhi_epi16(words_hi, zero));
        }

        _mm_storeu_si128(lanes.as_mut_ptr().cast::<__m128i>(), state);
    }

    /// `state * 33 + bytes` on all four dword lanes.
    #[inline]
    #[target_feature(enable = "sse2")]
    pub(in crate::engine) unsafe fn round(state: __m128i, bytes: __m128i) -> __m128i {
        let sum = _mm_add_epi32(bytes, state);
        _mm_add_epi32(_mm_slli_epi32::<5>(state), sum)
    }

}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[allow(unsafe_code)]
#[allow(unsafe_op_in_unsafe_fn)]
pub(super) mod neon {
    use core::arch::aarch64::{
        uint32x4_t, vaddq_u32, vget_high_u8, vget_high_u16, vget_low_u8, vget_low_u16,
        vld1q_u8, vld1q_u32, vmovl_u8, vmovl_u16, vshlq_n_u32, vst1q_u32,
    };

    use crate::align::AlignedSlice;
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
        let mut state = vld1q_u32(lanes.as_ptr());

        for block in blocks {
            let input = vld1q_u8(block.as_ptr());
            let words_lo = vmovl_u8(vget_low_u8(input));
            let words_hi = vmovl_u8(vget_high_u8(input));
            state = round(state, vmovl_u16(vget_low_u16(words_lo)));
            state = round(state, vmovl_u16(vget_high_u16(words_lo)));
            state = round(state, vmovl_u16(vget_low_u16(words_hi)));
            state = round(state, vmovl_u16(vget_high_u16(words_hi)));
        }

        vst1q_u32(lanes.as_mut_ptr(), state);
    }

    /// `state * 33 + bytes` on all four lanes.
    #[inline]
    #[target_feature(enable = "neon")]
    pub(in crate::engine) unsafe fn round(state: uint32x4_t, bytes: uint32x4_t) -> uint32x4_t {
        vaddq_u32(vshlq_n_u32::<5>(state), vaddq_u32(bytes, state))
    }
}
