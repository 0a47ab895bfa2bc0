//! Parameter validation shared by every hash primitive.
//!
//! The validator works on [`Region`] descriptors (start address plus length)
//! rather than slices so the same checks serve the safe API and the C ABI,
//! where null pointers and overlapping buffers are real possibilities.

use crate::error::HashError;

/// Address range handed to a hash primitive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Region {
    addr: usize,
    len: usize,
}

impl Region {
    /// Describes `len` bytes starting at `addr`.
    #[must_use]
    pub const fn new(addr: usize, len: usize) -> Self {
        Self { addr, len }
    }

    /// Describes the memory behind a slice.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self::new(bytes.as_ptr() as usize, bytes.len())
    }

    /// Describes the memory behind a raw pointer.
    #[must_use]
    pub fn from_raw<T>(ptr: *const T, len: usize) -> Self {
        Self::new(ptr as usize, len)
    }

    /// Start address.
    #[must_use]
    pub const fn addr(self) -> usize {
        self.addr
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Returns `true` when the region spans no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// A null start address is only acceptable for an empty region.
    const fn is_well_formed(self) -> bool {
        self.addr != 0 || self.len == 0
    }

    /// Reports whether two regions share at least one byte.
    ///
    /// Empty regions never overlap anything.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        if self.len == 0 || other.len == 0 {
            return false;
        }
        let self_end = self.addr.saturating_add(self.len);
        let other_end = other.addr.saturating_add(other.len);
        self.addr < other_end && other.addr < self_end
    }
}

/// Checks a hash call before any accumulation happens.
///
/// Failures are reported in a fixed order: invalid parameter, output too
/// small, overlap, cookie too small.
///
/// # Examples
///
/// ```
/// use hashes::{HashError, Region, validate};
///
/// let input = [0u8; 4];
/// let cookie = [0u8; 16];
/// let out = [0u8; 15];
/// let err = validate(16, Region::of(&input), Region::of(&cookie), Region::of(&out)).unwrap_err();
/// assert_eq!(err, HashError::BufferTooSmall { required: 16, actual: 15 });
/// ```
pub fn validate(
    digest_width: usize,
    buffer: Region,
    cookie: Region,
    output: Region,
) -> Result<(), HashError> {
    if digest_width == 0
        || !buffer.is_well_formed()
        || !cookie.is_well_formed()
        || !output.is_well_formed()
    {
        return Err(HashError::InvalidParameter);
    }

    if output.len < digest_width {
        return Err(HashError::BufferTooSmall {
            required: digest_width,
            actual: output.len,
        });
    }

    if buffer.overlaps(output) {
        return Err(HashError::Overlap);
    }

    if cookie.len < digest_width {
        return Err(HashError::CookieTooSmall {
            required: digest_width,
            actual: cookie.len,
        });
    }

    Ok(())
}

/// Slice front end for [`validate`].
pub(crate) fn validate_slices(
    digest_width: usize,
    buffer: &[u8],
    cookie: &[u8],
    output: &[u8],
) -> Result<(), HashError> {
    validate(
        digest_width,
        Region::of(buffer),
        Region::of(cookie),
        Region::of(output),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOKIE: Region = Region::new(0x1000, 16);

    #[test]
    fn accepts_well_formed_call() {
        let buffer = Region::new(0x2000, 64);
        let output = Region::new(0x3000, 16);
        assert_eq!(validate(16, buffer, COOKIE, output), Ok(()));
    }

    #[test]
    fn null_buffer_is_fine_when_empty() {
        let output = Region::new(0x3000, 16);
        assert_eq!(validate(16, Region::new(0, 0), COOKIE, output), Ok(()));
    }

    #[test]
    fn null_buffer_with_length_is_invalid() {
        let output = Region::new(0x3000, 16);
        assert_eq!(
            validate(16, Region::new(0, 3), COOKIE, output),
            Err(HashError::InvalidParameter)
        );
    }

    #[test]
    fn null_output_with_length_is_invalid() {
        let buffer = Region::new(0x2000, 4);
        assert_eq!(
            validate(16, buffer, COOKIE, Region::new(0, 16)),
            Err(HashError::InvalidParameter)
        );
    }

    #[test]
    fn zero_digest_width_is_invalid() {
        let buffer = Region::new(0x2000, 4);
        let output = Region::new(0x3000, 16);
        assert_eq!(
            validate(0, buffer, COOKIE, output),
            Err(HashError::InvalidParameter)
        );
    }

    #[test]
    fn short_output_is_rejected_before_overlap() {
        let buffer = Region::new(0x2000, 64);
        let output = Region::new(0x2000, 15);
        assert_eq!(
            validate(16, buffer, COOKIE, output),
            Err(HashError::BufferTooSmall {
                required: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn identical_start_addresses_overlap() {
        let buffer = Region::new(0x2000, 64);
        let output = Region::new(0x2000, 16);
        assert_eq!(
            validate(16, buffer, COOKIE, output),
            Err(HashError::Overlap)
        );
    }

    #[test]
    fn touching_regions_do_not_overlap() {
        let buffer = Region::new(0x2000, 16);
        let output = Region::new(0x2010, 16);
        assert!(!buffer.overlaps(output));
        assert!(!output.overlaps(buffer));
        assert!(buffer.overlaps(Region::new(0x200f, 16)));
    }

    #[test]
    fn empty_buffer_never_overlaps() {
        let output = Region::new(0x2000, 16);
        assert!(!Region::new(0x2004, 0).overlaps(output));
    }

    #[test]
    fn short_cookie_is_reported_last() {
        let buffer = Region::new(0x2000, 64);
        let output = Region::new(0x3000, 16);
        assert_eq!(
            validate(16, buffer, Region::new(0x1000, 8), output),
            Err(HashError::CookieTooSmall {
                required: 16,
                actual: 8
            })
        );
    }
}
