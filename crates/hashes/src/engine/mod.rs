//! The four-lane djbx33a engine family.
//!
//! Five interchangeable bodies compute the identical 128-bit digest:
//!
//! | Engine | Fast loop | Alignment | Block |
//! |--------|-----------|-----------|-------|
//! | [`Engine::Reference`] | none, multiply per byte | 1 | 1 |
//! | [`Engine::Scalar`] | unrolled shift-add | 16 | 16 |
//! | [`Engine::Narrow`] | two 64-bit registers, two lanes each | 8 | 8 |
//! | [`Engine::Medium`] | 128-bit register, byte-to-dword unpack | 16 | 16 |
//! | [`Engine::Shuffle`] | 128-bit register, byte shuffle plus mask | 16 | 16 |
//!
//! Every engine except the reference runs the same bracket around its fast
//! loop: consume the unaligned prefix byte by byte, rotate the lanes into
//! block order, fold whole blocks, rotate back, consume the tail byte by
//! byte. The kernels only implement the block fold ([`LaneKernel`]).

use core::fmt;
use core::str::FromStr;

use crate::align::{AlignedSlice, split_aligned};
use crate::cookie::mix_lanes;
use crate::error::HashError;
use crate::lanes::{LANES, LaneState};
use crate::params::validate_slices;

pub(crate) mod medium;
pub(crate) mod narrow;
pub(crate) mod reference;
pub(crate) mod scalar;
pub(crate) mod shuffle;


/// Digest width of the four-lane family in bytes.
pub const DIGEST_LEN_128: usize = 16;

/// Implementation tier of the four-lane family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Engine {
    /// Byte-at-a-time multiply recurrence; the ground truth.
    Reference,
    /// Shift-add recurrence unrolled over aligned 16-byte blocks.
    Scalar,
    /// Lane pairs packed into 64-bit registers, 8-byte blocks.
    Narrow,
    /// 128-bit vector lanes fed by successive unpack operations.
    Medium,
    /// 128-bit vector lanes fed by a byte shuffle and shift-mask rounds.
    Shuffle,
}

impl Engine {
    /// Every tier, slowest first.
    pub const ALL: [Self; 5] = [
        Self::Reference,
        Self::Scalar,
        Self::Narrow,
        Self::Medium,
        Self::Shuffle,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "ref",
            Self::Scalar => "scalar",
            Self::Narrow => "narrow",
            Self::Medium => "medium",
            Self::Shuffle => "shuffle",
        }
    }

    /// Address alignment the fast loop requires.
    #[must_use]
    pub const fn alignment(self) -> usize {
        match self {
            Self::Reference => 1,
            Self::Scalar => scalar::Scalar::ALIGN,
            Self::Narrow => narrow::Narrow::ALIGN,
            Self::Medium => medium::Medium::ALIGN,
            Self::Shuffle => shuffle::Shuffle::ALIGN,
        }
    }

    /// Bytes folded per fast-loop iteration.
    #[must_use]
    pub const fn block_len(self) -> usize {
        match self {
            Self::Reference => 1,
            Self::Scalar => scalar::Scalar::BLOCK,
            Self::Narrow => narrow::Narrow::BLOCK,
            Self::Medium => medium::Medium::BLOCK,
            Self::Shuffle => shuffle::Shuffle::BLOCK,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown engine or primitive name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown hash algorithm '{name}'")]
pub struct UnknownAlgorithm {
    name: String,
}

impl UnknownAlgorithm {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    /// The name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Engine {
    type Err = UnknownAlgorithm;

    /// Accepts the stable names plus the instruction-set aliases of the
    /// original C library (`copt`, `mmx`, `sse2`, `ssse3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ref" | "reference" => Ok(Self::Reference),
            "scalar" | "copt" => Ok(Self::Scalar),
            "narrow" | "mmx" => Ok(Self::Narrow),
            "medium" | "sse2" => Ok(Self::Medium),
            "shuffle" | "ssse3" => Ok(Self::Shuffle),
            _ => Err(UnknownAlgorithm::new(s)),
        }
    }
}

/// Block fold shared by the accelerated tiers.
///
/// `fold_blocks` receives the accumulators already rotated so that lane 0
/// owns the first byte of `body`, and must apply
/// `lane[i % 4] = lane[i % 4] * 33 + body[i]` for every byte of the whole
/// blocks it consumes. It returns the number of bytes consumed, always a
/// multiple of [`LANES`].
pub(crate) trait LaneKernel {
    const ALIGN: usize;
    const BLOCK: usize;

    fn fold_blocks(lanes: &mut [u32; LANES], body: AlignedSlice<'_>) -> usize;
}

/// Runs the prefix / rotate / fold / unrotate / tail bracket for `K`.
pub(crate) fn absorb_with<K: LaneKernel>(buffer: &[u8]) -> LaneState {
    let split = split_aligned(buffer, K::ALIGN);
    let mut state = LaneState::new();

    state.absorb(split.prefix);
    let consumed = state.in_block_order(|lanes| K::fold_blocks(lanes, split.aligned));
    debug_assert_eq!(consumed % LANES, 0);
    state.absorb(&split.aligned.as_slice()[consumed..]);

    state
}

/// Validates, hashes with kernel `K`, mixes the cookie and writes the digest.
pub(crate) fn hash_with<K: LaneKernel>(
    buffer: &[u8],
    cookie: &[u8],
    out: &mut [u8],
) -> Result<(), HashError> {
    validate_slices(DIGEST_LEN_128, buffer, cookie, out)?;
    let state = absorb_with::<K>(buffer);
    emit(state.lanes(), cookie, out);
    Ok(())
}

#[inline]
pub(crate) fn emit(lanes: &[u32; LANES], cookie: &[u8], out: &mut [u8]) {
    out[..DIGEST_LEN_128].copy_from_slice(&mix_lanes(lanes, cookie));
}
