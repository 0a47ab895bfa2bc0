//! C ABI with the `(buffer, size, cookie, size, out, size) -> int` shape.
//!
//! Every entry point runs the validator on the raw address ranges first, so
//! null pointers and overlapping input/output are rejected with the same
//! result codes as the safe API before any slice is formed. The cookie is
//! copied out before hashing and the digest is written with a single copy,
//! so a cookie that aliases the output is tolerated.
//!
//! # Safety
//!
//! Callers must pass pointers that are valid for reads (buffer, cookie) or
//! writes (output) of the sizes they pass alongside them, for the duration
//! of the call. A null pointer is accepted only with a size of zero.
//!
//! The `_sse2` and `_ssse3` entry points exist only on x86 builds with the
//! `simd` feature. On a CPU without the instruction set they return
//! [`HX4_ERR_PARAM_INVALID`](crate::HX4_ERR_PARAM_INVALID) and write nothing.

#![allow(unsafe_code)]

use core::ffi::{c_int, c_void};
use core::{ptr, slice};

use crate::engine::DIGEST_LEN_128;
use crate::engine::narrow::x4djbx33a_128_narrow;
use crate::error::{HX4_ERR_SUCCESS, HashError, result_code};
use crate::params::{Region, validate};
use crate::registry::{Family, fastest};
use crate::single::DIGEST_LEN_32;
use crate::{djbx33a_32_ref, djbx33a_32_scalar, x4djbx33a_128_ref, x4djbx33a_128_scalar};

/// Validates the raw ranges, hashes, and copies the digest out on success.
///
/// # Safety
///
/// See the module documentation.
#[allow(clippy::too_many_arguments)]
unsafe fn hash_raw<F>(
    width: usize,
    hash: F,
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int
where
    F: Fn(&[u8], &[u8], &mut [u8]) -> Result<(), HashError>,
{
    debug_assert!(width <= DIGEST_LEN_128);
    let checked = validate(
        width,
        Region::from_raw(buffer, buffer_size),
        Region::from_raw(cookie, cookie_size),
        Region::from_raw(out_hash.cast_const(), out_hash_size),
    );
    if let Err(err) = checked {
        return err.code();
    }

    let input: &[u8] = if buffer_size == 0 {
        &[]
    } else {
        // SAFETY: non-null after validation; caller guarantees readability.
        unsafe { slice::from_raw_parts(buffer.cast::<u8>(), buffer_size) }
    };

    let mut salt = [0u8; DIGEST_LEN_128];
    // SAFETY: the validator guaranteed a non-null cookie of at least `width` bytes.
    unsafe { ptr::copy_nonoverlapping(cookie.cast::<u8>(), salt.as_mut_ptr(), width) };

    let mut digest = [0u8; DIGEST_LEN_128];
    let code = result_code(hash(input, &salt[..width], &mut digest[..width]));
    if code == HX4_ERR_SUCCESS {
        // SAFETY: the validator guaranteed a non-null output of at least
        // `width` bytes that does not overlap the input.
        unsafe { ptr::copy_nonoverlapping(digest.as_ptr(), out_hash.cast::<u8>(), width) };
    }
    code
}

/// Single-lane reference djbx33a; writes 4 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_djbx33a_32_ref(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_32,
            djbx33a_32_ref,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Single-lane scalar-optimized djbx33a; writes 4 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_djbx33a_32_copt(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_32,
            djbx33a_32_scalar,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane reference engine; writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_ref(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            x4djbx33a_128_ref,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane scalar-optimized engine; writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_copt(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            x4djbx33a_128_scalar,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane hash on the fastest engine the CPU supports; writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_fastest(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    let hasher = fastest(Family::X4Djbx33a128);
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            |input: &[u8], salt: &[u8], out: &mut [u8]| hasher.hash(input, salt, out),
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane narrow engine (two lanes per 64-bit word); writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_mmx(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            x4djbx33a_128_narrow,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane SSE2 unpack engine; writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[cfg_attr(docsrs, doc(cfg(feature = "simd")))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_sse2(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    if !crate::capabilities().supports(crate::Engine::Medium) {
        return crate::HX4_ERR_PARAM_INVALID;
    }
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            crate::engine::medium::x4djbx33a_128_medium,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}

/// Four-lane SSSE3 shuffle engine; writes 16 bytes.
///
/// # Safety
///
/// See the module documentation.
#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[cfg_attr(docsrs, doc(cfg(feature = "simd")))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hx4_x4djbx33a_128_ssse3(
    buffer: *const c_void,
    buffer_size: usize,
    cookie: *const c_void,
    cookie_size: usize,
    out_hash: *mut c_void,
    out_hash_size: usize,
) -> c_int {
    if !crate::capabilities().supports(crate::Engine::Shuffle) {
        return crate::HX4_ERR_PARAM_INVALID;
    }
    // SAFETY: forwarded caller contract.
    unsafe {
        hash_raw(
            DIGEST_LEN_128,
            crate::engine::shuffle::x4djbx33a_128_shuffle,
            buffer,
            buffer_size,
            cookie,
            cookie_size,
            out_hash,
            out_hash_size,
        )
    }
}
