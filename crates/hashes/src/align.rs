//! Alignment scanning and aligned views.
//!
//! The fast loops never do address arithmetic themselves. They receive an
//! [`AlignedSlice`] whose start address is already known to satisfy their
//! alignment, produced by [`split_aligned`] together with the prefix that
//! has to be consumed one byte at a time first.

/// Number of bytes between `addr` and the next multiple of `align`.
///
/// `align` must be a power of two. The result lies in `0..align`.
#[inline]
#[must_use]
pub const fn bytes_to_aligned(addr: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    addr.wrapping_neg() & (align - 1)
}

/// Leading bytes of `data` to consume before its cursor is `align`-aligned,
/// capped at the length of `data`.
///
/// # Examples
///
/// ```
/// use hashes::alignment_offset;
///
/// let data = [0u8; 3];
/// assert!(alignment_offset(&data, 16) <= data.len());
/// assert_eq!(alignment_offset(&[], 16), 0);
/// ```
#[inline]
#[must_use]
pub fn alignment_offset(data: &[u8], align: usize) -> usize {
    bytes_to_aligned(data.as_ptr() as usize, align).min(data.len())
}

/// Byte slice whose first byte sits on an `align`-byte boundary.
#[derive(Clone, Copy, Debug)]
pub struct AlignedSlice<'a> {
    bytes: &'a [u8],
    align: usize,
}

impl<'a> AlignedSlice<'a> {
    /// Alignment guaranteed for the first byte.
    #[must_use]
    pub const fn align(&self) -> usize {
        self.align
    }

    /// Underlying bytes.
    #[must_use]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of bytes in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the view is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whole `N`-byte blocks at the front of the view.
    ///
    /// Every block starts aligned when `N` is a multiple of
    /// [`align`](Self::align).
    #[must_use]
    pub fn blocks<const N: usize>(&self) -> &'a [[u8; N]] {
        debug_assert!(N % self.align == 0);
        self.bytes.as_chunks::<N>().0
    }

    /// Bytes left over after the whole `N`-byte blocks.
    #[must_use]
    pub fn tail<const N: usize>(&self) -> &'a [u8] {
        self.bytes.as_chunks::<N>().1
    }
}

/// Unaligned prefix plus the aligned remainder of a buffer.
#[derive(Clone, Copy, Debug)]
pub struct AlignedSplit<'a> {
    /// Bytes consumed one at a time before the aligned view begins.
    pub prefix: &'a [u8],
    /// Rest of the buffer, starting on the alignment boundary.
    pub aligned: AlignedSlice<'a>,
}

/// Splits `data` at its first `align`-aligned address.
///
/// When `data` ends before reaching the boundary the prefix holds all of it
/// and the aligned view is empty.
///
/// # Examples
///
/// ```
/// use hashes::split_aligned;
///
/// let data = vec![7u8; 100];
/// let split = split_aligned(&data, 16);
/// assert_eq!(split.prefix.len() + split.aligned.len(), data.len());
/// assert_eq!(split.aligned.as_slice().as_ptr() as usize % 16, 0);
/// ```
#[must_use]
pub fn split_aligned(data: &[u8], align: usize) -> AlignedSplit<'_> {
    let offset = alignment_offset(data, align);
    let (prefix, rest) = data.split_at(offset);
    debug_assert!(rest.is_empty() || rest.as_ptr() as usize % align == 0);
    AlignedSplit {
        prefix,
        aligned: AlignedSlice { bytes: rest, align },
    }
}
