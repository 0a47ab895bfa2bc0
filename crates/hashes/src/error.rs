//! Error taxonomy shared by every hash primitive.

/// Result code reported by the C ABI when a hash call succeeds.
pub const HX4_ERR_SUCCESS: i32 = 0;
/// Result code for [`HashError::InvalidParameter`].
pub const HX4_ERR_PARAM_INVALID: i32 = -1;
/// Result code for [`HashError::BufferTooSmall`].
pub const HX4_ERR_BUFFER_TOO_SMALL: i32 = -2;
/// Result code for [`HashError::Overlap`].
pub const HX4_ERR_OVERLAP: i32 = -3;
/// Result code for [`HashError::CookieTooSmall`].
pub const HX4_ERR_COOKIE_TOO_SMALL: i32 = -4;

/// Reasons a hash call is rejected before any hashing work starts.
///
/// Every variant is raised by the parameter validator; once validation
/// passes the computation itself cannot fail. No output byte is written
/// when one of these is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum HashError {
    /// A required pointer is null while its size is nonzero, or the digest
    /// width is zero.
    #[error("invalid hash parameter")]
    InvalidParameter,
    /// The output region cannot hold the digest.
    #[error("output region of {actual} bytes cannot hold a {required}-byte digest")]
    BufferTooSmall {
        /// Digest width of the selected primitive.
        required: usize,
        /// Size of the output region supplied by the caller.
        actual: usize,
    },
    /// The input and output regions share at least one byte.
    #[error("input and output regions overlap")]
    Overlap,
    /// The cookie is shorter than the digest it is mixed into.
    #[error("cookie of {actual} bytes is shorter than the {required}-byte digest")]
    CookieTooSmall {
        /// Digest width of the selected primitive.
        required: usize,
        /// Size of the cookie supplied by the caller.
        actual: usize,
    },
}

impl HashError {
    /// Returns the stable negative result code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashes::HashError;
    ///
    /// assert_eq!(HashError::Overlap.code(), -3);
    /// ```
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidParameter => HX4_ERR_PARAM_INVALID,
            Self::BufferTooSmall { .. } => HX4_ERR_BUFFER_TOO_SMALL,
            Self::Overlap => HX4_ERR_OVERLAP,
            Self::CookieTooSmall { .. } => HX4_ERR_COOKIE_TOO_SMALL,
        }
    }

    /// Reconstructs the error kind from a result code.
    ///
    /// Size details are not carried by the code and come back as zero.
    /// Returns `None` for [`HX4_ERR_SUCCESS`] and unknown codes.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            HX4_ERR_PARAM_INVALID => Some(Self::InvalidParameter),
            HX4_ERR_BUFFER_TOO_SMALL => Some(Self::BufferTooSmall {
                required: 0,
                actual: 0,
            }),
            HX4_ERR_OVERLAP => Some(Self::Overlap),
            HX4_ERR_COOKIE_TOO_SMALL => Some(Self::CookieTooSmall {
                required: 0,
                actual: 0,
            }),
            _ => None,
        }
    }
}

/// Folds a hash result into the integer convention of the C ABI.
#[must_use]
pub const fn result_code(result: Result<(), HashError>) -> i32 {
    match result {
        Ok(()) => HX4_ERR_SUCCESS,
        Err(err) => err.code(),
    }
}
