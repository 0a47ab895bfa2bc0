//! Runtime capability detection and engine selection.
//!
//! The registry is the only place that decides which engine runs. It never
//! substitutes one engine for another: asking for an engine the CPU cannot
//! run yields `None`, and [`fastest`] only ever picks among engines that
//! are available.

use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use crate::engine::medium::x4djbx33a_128_medium;
use crate::engine::narrow::x4djbx33a_128_narrow;
use crate::engine::reference::x4djbx33a_128_ref;
use crate::engine::scalar::x4djbx33a_128_scalar;
use crate::engine::shuffle::x4djbx33a_128_shuffle;
use crate::engine::{DIGEST_LEN_128, Engine, UnknownAlgorithm};
use crate::error::HashError;
use crate::single::{DIGEST_LEN_32, djbx33a_32_ref, djbx33a_32_scalar};
use crate::trace::{trace_detected, trace_resolved};

/// CPU features relevant to the vector engines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Capabilities {
    sse2: bool,
    ssse3: bool,
    neon: bool,
}

impl Capabilities {
    /// No vector features at all.
    pub const NONE: Self = Self {
        sse2: false,
        ssse3: false,
        neon: false,
    };

    /// Probes the running CPU.
    #[must_use]
    pub fn detect() -> Self {
        detect_arch()
    }

    /// x86 SSE2.
    #[must_use]
    pub const fn sse2(self) -> bool {
        self.sse2
    }

    /// x86 SSSE3.
    #[must_use]
    pub const fn ssse3(self) -> bool {
        self.ssse3
    }

    /// aarch64 Advanced SIMD.
    #[must_use]
    pub const fn neon(self) -> bool {
        self.neon
    }

    /// Whether `engine` can run with these features in this build.
    ///
    /// The reference, scalar and narrow engines are plain integer code and
    /// always run. The vector engines additionally need the `simd` feature.
    #[must_use]
    pub const fn supports(self, engine: Engine) -> bool {
        match engine {
            Engine::Reference | Engine::Scalar | Engine::Narrow => true,
            Engine::Medium => cfg!(feature = "simd") && (self.sse2 || self.neon),
            Engine::Shuffle => cfg!(feature = "simd") && ((self.sse2 && self.ssse3) || self.neon),
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_arch() -> Capabilities {
    Capabilities {
        sse2: std::arch::is_x86_feature_detected!("sse2"),
        ssse3: std::arch::is_x86_feature_detected!("ssse3"),
        neon: false,
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_arch() -> Capabilities {
    Capabilities {
        neon: std::arch::is_aarch64_feature_detected!("neon"),
        ..Capabilities::NONE
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_arch() -> Capabilities {
    Capabilities::NONE
}

/// Capabilities of the running CPU, detected once and cached.
pub fn capabilities() -> Capabilities {
    static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();
    *CAPABILITIES.get_or_init(|| {
        let caps = Capabilities::detect();
        trace_detected(caps);
        caps
    })
}

/// Digest family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    /// One accumulator, 4-byte digest.
    Djbx33a32,
    /// Four interleaved accumulators, 16-byte digest.
    X4Djbx33a128,
}

impl Family {
    /// Stable name used as the primitive name prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Djbx33a32 => "djbx33a-32",
            Self::X4Djbx33a128 => "x4djbx33a-128",
        }
    }

    /// Digest width in bytes.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Djbx33a32 => DIGEST_LEN_32,
            Self::X4Djbx33a128 => DIGEST_LEN_128,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete hash function: one family computed by one engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Primitive {
    family: Family,
    engine: Engine,
}

impl Primitive {
    /// Every primitive this crate implements.
    pub const ALL: [Self; 7] = [
        Self::of(Family::Djbx33a32, Engine::Reference),
        Self::of(Family::Djbx33a32, Engine::Scalar),
        Self::of(Family::X4Djbx33a128, Engine::Reference),
        Self::of(Family::X4Djbx33a128, Engine::Scalar),
        Self::of(Family::X4Djbx33a128, Engine::Narrow),
        Self::of(Family::X4Djbx33a128, Engine::Medium),
        Self::of(Family::X4Djbx33a128, Engine::Shuffle),
    ];

    const fn of(family: Family, engine: Engine) -> Self {
        Self { family, engine }
    }

    /// Pairs `family` with `engine`; the single-lane family only has the
    /// reference and scalar engines.
    #[must_use]
    pub const fn new(family: Family, engine: Engine) -> Option<Self> {
        match (family, engine) {
            (Family::Djbx33a32, Engine::Narrow | Engine::Medium | Engine::Shuffle) => None,
            _ => Some(Self::of(family, engine)),
        }
    }

    /// Digest family.
    #[must_use]
    pub const fn family(self) -> Family {
        self.family
    }

    /// Engine tier.
    #[must_use]
    pub const fn engine(self) -> Engine {
        self.engine
    }

    /// Digest width in bytes.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        self.family.digest_len()
    }

    /// Stable name, e.g. `x4djbx33a-128-shuffle`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match (self.family, self.engine) {
            (Family::Djbx33a32, Engine::Reference) => "djbx33a-32-ref",
            (Family::Djbx33a32, _) => "djbx33a-32-scalar",
            (Family::X4Djbx33a128, Engine::Reference) => "x4djbx33a-128-ref",
            (Family::X4Djbx33a128, Engine::Scalar) => "x4djbx33a-128-scalar",
            (Family::X4Djbx33a128, Engine::Narrow) => "x4djbx33a-128-narrow",
            (Family::X4Djbx33a128, Engine::Medium) => "x4djbx33a-128-medium",
            (Family::X4Djbx33a128, Engine::Shuffle) => "x4djbx33a-128-shuffle",
        }
    }

    /// Whether the running CPU and this build can execute the primitive.
    #[must_use]
    pub fn is_available(self) -> bool {
        capabilities().supports(self.engine)
    }

    /// A callable hasher, or `None` when the primitive is unavailable.
    #[must_use]
    pub fn hasher(self) -> Option<Hasher> {
        if !self.is_available() {
            return None;
        }
        trace_resolved(self);
        Some(Hasher::new(self))
    }

    fn hash_fn(self) -> HashFn {
        match (self.family, self.engine) {
            (Family::Djbx33a32, Engine::Reference) => djbx33a_32_ref,
            (Family::Djbx33a32, _) => djbx33a_32_scalar,
            (Family::X4Djbx33a128, Engine::Reference) => x4djbx33a_128_ref,
            (Family::X4Djbx33a128, Engine::Scalar) => x4djbx33a_128_scalar,
            (Family::X4Djbx33a128, Engine::Narrow) => x4djbx33a_128_narrow,
            (Family::X4Djbx33a128, Engine::Medium) => x4djbx33a_128_medium,
            (Family::X4Djbx33a128, Engine::Shuffle) => x4djbx33a_128_shuffle,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = UnknownAlgorithm;

    /// Parses `<family>-<engine>`, where the engine part accepts every
    /// spelling [`Engine`] does (`x4djbx33a-128-ssse3` names the shuffle
    /// engine).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        [Family::X4Djbx33a128, Family::Djbx33a32]
            .into_iter()
            .find_map(|family| {
                let engine = lower
                    .strip_prefix(family.name())?
                    .strip_prefix('-')?
                    .parse::<Engine>()
                    .ok()?;
                Self::new(family, engine)
            })
            .ok_or_else(|| UnknownAlgorithm::new(s))
    }
}

/// Primitives the running CPU can execute, in [`Primitive::ALL`] order.
#[must_use]
pub fn available_primitives() -> Vec<Primitive> {
    Primitive::ALL
        .into_iter()
        .filter(|primitive| primitive.is_available())
        .collect()
}

const PREFERENCE: [Engine; 3] = [Engine::Shuffle, Engine::Medium, Engine::Scalar];

/// The preferred available hasher for `family`.
///
/// Tries the shuffle engine, then medium, then scalar. The narrow engine is
/// never chosen here; ask for it by name.
#[must_use]
pub fn fastest(family: Family) -> Hasher {
    let primitive = PREFERENCE
        .into_iter()
        .filter_map(|engine| Primitive::new(family, engine))
        .find(|primitive| primitive.is_available())
        .unwrap_or(Primitive::of(family, Engine::Scalar));
    trace_resolved(primitive);
    Hasher::new(primitive)
}

type HashFn = fn(&[u8], &[u8], &mut [u8]) -> Result<(), HashError>;

/// A resolved, runnable primitive.
#[derive(Clone, Copy)]
pub struct Hasher {
    primitive: Primitive,
    hash: HashFn,
}

impl Hasher {
    fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            hash: primitive.hash_fn(),
        }
    }

    /// The primitive this hasher runs.
    #[must_use]
    pub const fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Hashes `buffer` into `out`, mixing in `cookie`.
    ///
    /// # Errors
    ///
    /// Returns the validator's [`HashError`]; `out` is untouched on error.
    pub fn hash(&self, buffer: &[u8], cookie: &[u8], out: &mut [u8]) -> Result<(), HashError> {
        (self.hash)(buffer, cookie, out)
    }

    /// Hashes `buffer` into an owned [`Digest`].
    ///
    /// # Errors
    ///
    /// Returns the validator's [`HashError`], in practice
    /// [`HashError::CookieTooSmall`] since the output is sized here.
    pub fn digest(&self, buffer: &[u8], cookie: &[u8]) -> Result<Digest, HashError> {
        let mut digest = Digest {
            bytes: [0u8; DIGEST_LEN_128],
            len: self.primitive.digest_len(),
        };
        self.hash(buffer, cookie, &mut digest.bytes[..digest.len])?;
        Ok(digest)
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("primitive", &self.primitive)
            .finish_non_exhaustive()
    }
}

/// Owned digest bytes; 4 or 16 bytes long depending on the family.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Digest {
    bytes: [u8; DIGEST_LEN_128],
    len: usize,
}

impl Digest {
    /// Digest bytes in output order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Digest width in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; every family has a non-empty digest.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Lowercase hex, bytes in output order.
impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}
