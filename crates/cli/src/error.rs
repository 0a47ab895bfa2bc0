//! Failures reported by the command-line front end.

use std::io;
use std::path::PathBuf;

use hashes::{HashError, Primitive, UnknownAlgorithm};

/// Error surfaced to the user with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// `--algorithm` named no known primitive.
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
    /// The primitive exists but this CPU or build cannot run it.
    #[error("{primitive} is not supported on this CPU")]
    Unsupported {
        /// Requested primitive.
        primitive: Primitive,
    },
    /// `--cookie` was not valid hex.
    #[error("invalid cookie: {reason}")]
    InvalidCookie {
        /// What was wrong with the argument.
        reason: String,
    },
    /// An input could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed; `-` for standard input.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing a digest line failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    /// The hash call rejected its parameters.
    #[error(transparent)]
    Hash(#[from] HashError),
}
