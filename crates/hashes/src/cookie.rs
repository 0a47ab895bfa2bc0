//! Cookie mixing: XOR of caller salt into the finished accumulator bytes.
//!
//! The cookie never enters the recurrence. Accumulators are viewed in
//! little-endian byte order, lane 0 first, and byte `i` of the cookie is
//! XORed into byte `i` of that view.

use crate::lanes::LANES;

/// Mixes the first four cookie bytes into a single accumulator.
///
/// The caller guarantees `cookie.len() >= 4`.
#[inline]
pub(crate) fn mix_single(state: u32, cookie: &[u8]) -> [u8; 4] {
    let mut bytes = state.to_le_bytes();
    xor_into(&mut bytes, cookie);
    bytes
}

/// Mixes the first sixteen cookie bytes into the four lane accumulators.
///
/// The caller guarantees `cookie.len() >= 16`.
#[inline]
pub(crate) fn mix_lanes(lanes: &[u32; LANES], cookie: &[u8]) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    for (dst, lane) in bytes.chunks_exact_mut(4).zip(lanes) {
        dst.copy_from_slice(&lane.to_le_bytes());
    }
    xor_into(&mut bytes, cookie);
    bytes
}

#[inline]
fn xor_into(bytes: &mut [u8], cookie: &[u8]) {
    debug_assert!(cookie.len() >= bytes.len());
    for (byte, salt) in bytes.iter_mut().zip(cookie) {
        *byte ^= salt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cookie_leaves_state_untouched() {
        let lanes = [5381u32; 4];
        let digest = mix_lanes(&lanes, &[0u8; 16]);
        for chunk in digest.chunks_exact(4) {
            assert_eq!(chunk, 5381u32.to_le_bytes());
        }
    }

    #[test]
    fn only_digest_width_of_cookie_is_used() {
        let lanes = [1u32, 2, 3, 4];
        let mut long_cookie = [0xAAu8; 32];
        let short = mix_lanes(&lanes, &long_cookie[..16]);
        long_cookie[16..].fill(0x55);
        assert_eq!(mix_lanes(&lanes, &long_cookie), short);
    }

    #[test]
    fn cookie_bytes_line_up_with_little_endian_lanes() {
        let lanes = [0x0403_0201u32, 0, 0, 0];
        let mut cookie = [0u8; 16];
        cookie[0] = 0x01;
        cookie[3] = 0x04;
        cookie[4] = 0xff;
        let digest = mix_lanes(&lanes, &cookie);
        assert_eq!(&digest[..5], &[0x00, 0x02, 0x03, 0x00, 0xff]);
    }

    #[test]
    fn single_lane_mix() {
        assert_eq!(mix_single(0x1122_3344, &[0xff, 0, 0, 0xff]), [0xbb, 0x33, 0x22, 0xee]);
    }
}
