//! Dispatch tracing: capability detection and engine resolution.
//!
//! Hash calls themselves never log.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::registry::{Capabilities, Primitive};

/// Trace the CPU features found on first use of the registry.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_detected(caps: Capabilities) {
    debug!(
        target: "hashx4::dispatch",
        sse2 = caps.sse2(),
        ssse3 = caps.ssse3(),
        neon = caps.neon(),
        "detected cpu features"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_detected(_caps: Capabilities) {}

/// Trace the engine a family lookup resolved to.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_resolved(primitive: Primitive) {
    debug!(
        target: "hashx4::dispatch",
        primitive = primitive.name(),
        "resolved {}",
        primitive
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_resolved(_primitive: Primitive) {}
