//! Rayon batch hashing.
//!
//! Hash calls share no state, so independent inputs can be spread over the
//! rayon pool without any synchronization.

use rayon::prelude::*;

use crate::error::HashError;
use crate::registry::{Digest, Hasher};

/// Hashes every input with `hasher` on the rayon pool.
///
/// Results come back in input order, one per input.
///
/// # Examples
///
/// ```
/// use hashes::{Family, fastest, parallel::hash_batch};
///
/// let inputs = [b"alpha".as_slice(), b"beta", b""];
/// let digests = hash_batch(fastest(Family::X4Djbx33a128), &inputs, &[0u8; 16]);
/// assert_eq!(digests.len(), 3);
/// assert_eq!(
///     digests[2].as_ref().unwrap().to_string(),
///     "05150000051500000515000005150000"
/// );
/// ```
pub fn hash_batch<T>(hasher: Hasher, inputs: &[T], cookie: &[u8]) -> Vec<Result<Digest, HashError>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| hasher.digest(input.as_ref(), cookie))
        .collect()
}
