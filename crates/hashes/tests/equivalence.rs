//! Every available engine must agree with the reference engine for every
//! length, start alignment and cookie.

use hashes::{Family, Hasher, Primitive, available_primitives, djbx33a_32_ref, x4djbx33a_128_ref};
use proptest::prelude::*;

#[repr(C, align(64))]
struct Backing([u8; 8192]);

fn backing() -> Box<Backing> {
    let mut backing = Box::new(Backing([0u8; 8192]));
    let mut state = 0x2545_f491_u32;
    for byte in &mut backing.0 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *byte = state as u8;
    }
    backing
}

fn hashers(family: Family) -> Vec<(Primitive, Hasher)> {
    available_primitives()
        .into_iter()
        .filter(|p| p.family() == family)
        .filter_map(|p| p.hasher().map(|h| (p, h)))
        .collect()
}

fn reference(family: Family, input: &[u8], cookie: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 16];
    match family {
        Family::X4Djbx33a128 => x4djbx33a_128_ref(input, cookie, &mut out).unwrap(),
        Family::Djbx33a32 => {
            out.truncate(4);
            djbx33a_32_ref(input, cookie, &mut out).unwrap();
        }
    }
    out
}

#[test]
fn engines_agree_for_every_offset_and_short_length() {
    let backing = backing();
    let cookie: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(17).wrapping_add(1)).collect();

    for family in [Family::X4Djbx33a128, Family::Djbx33a32] {
        let hashers = hashers(family);
        for start in 0..64 {
            for len in 0..=80 {
                let input = &backing.0[start..start + len];
                let expected = reference(family, input, &cookie);
                for (primitive, hasher) in &hashers {
                    let digest = hasher.digest(input, &cookie).unwrap();
                    assert_eq!(
                        digest.as_bytes(),
                        expected.as_slice(),
                        "{primitive} mismatch at offset {start} len {len}"
                    );
                }
            }
        }
    }
}

#[test]
fn engines_agree_on_long_inputs() {
    let backing = backing();
    let cookie = [0xc3u8; 16];
    let hashers = hashers(Family::X4Djbx33a128);

    for start in [0, 1, 3, 7, 8, 9, 15, 16, 17] {
        for len in [255, 256, 257, 1023, 4096, 4099, 8192 - 17] {
            let input = &backing.0[start..start + len];
            let expected = reference(Family::X4Djbx33a128, input, &cookie);
            for (primitive, hasher) in &hashers {
                let digest = hasher.digest(input, &cookie).unwrap();
                assert_eq!(
                    digest.as_bytes(),
                    expected.as_slice(),
                    "{primitive} mismatch at offset {start} len {len}"
                );
            }
        }
    }
}

#[test]
fn lane_sensitive_inputs_differ() {
    // bytes four apart share a lane
    let cookie = [0u8; 16];
    let a = reference(Family::X4Djbx33a128, b"ab", &cookie);
    let b = reference(Family::X4Djbx33a128, b"ba", &cookie);
    assert_ne!(a, b);
    let c = reference(Family::X4Djbx33a128, b"a000b", &cookie);
    let d = reference(Family::X4Djbx33a128, b"b000a", &cookie);
    assert_ne!(c, d);
}

#[test]
fn single_byte_changes_alter_the_digest() {
    let cookie = [0u8; 16];
    let vectors: [&[u8]; 4] = [
        b"A",
        b"hello world",
        b"The quick brown fox jumps over the lazy dog",
        &[0u8; 37],
    ];
    for vector in vectors {
        let original = reference(Family::X4Djbx33a128, vector, &cookie);
        for position in 0..vector.len() {
            for flip in [0x01u8, 0x80, 0xff] {
                let mut changed = vector.to_vec();
                changed[position] ^= flip;
                let digest = reference(Family::X4Djbx33a128, &changed, &cookie);
                assert_ne!(digest, original, "flip {flip:#04x} at {position}");
            }
        }
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    let backing = backing();
    let cookie: Vec<u8> = (0..16u8).map(|i| i ^ 0x5c).collect();
    for family in [Family::X4Djbx33a128, Family::Djbx33a32] {
        for (primitive, hasher) in hashers(family) {
            for (start, len) in [(0, 0), (1, 15), (3, 64), (7, 1000)] {
                let input = &backing.0[start..start + len];
                let first = hasher.digest(input, &cookie).unwrap();

                let mut out = vec![0u8; primitive.digest_len()];
                for _ in 0..3 {
                    assert_eq!(hasher.digest(input, &cookie).unwrap(), first, "{primitive}");
                    hasher.hash(input, &cookie, &mut out).unwrap();
                    assert_eq!(out.as_slice(), first.as_bytes(), "{primitive}");
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn one_byte_difference_changes_reference_digest(
        data in proptest::collection::vec(any::<u8>(), 1..300),
        position in any::<proptest::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let cookie = [0u8; 16];
        let mut changed = data.clone();
        changed[position.index(data.len())] ^= flip;
        prop_assert_ne!(
            reference(Family::X4Djbx33a128, &data, &cookie),
            reference(Family::X4Djbx33a128, &changed, &cookie)
        );
    }

    #[test]
    fn random_inputs_match_reference(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        offset in 0usize..16,
        cookie in proptest::array::uniform16(any::<u8>()),
    ) {
        let offset = offset.min(data.len());
        let input = &data[offset..];
        let expected = reference(Family::X4Djbx33a128, input, &cookie);
        for (primitive, hasher) in hashers(Family::X4Djbx33a128) {
            let digest = hasher.digest(input, &cookie).unwrap();
            prop_assert_eq!(digest.as_bytes(), expected.as_slice(), "{}", primitive);
        }
    }

    #[test]
    fn cookie_only_flips_output_bits(
        data in proptest::collection::vec(any::<u8>(), 0..200),
        cookie in proptest::array::uniform16(any::<u8>()),
    ) {
        let plain = reference(Family::X4Djbx33a128, &data, &[0u8; 16]);
        let salted = reference(Family::X4Djbx33a128, &data, &cookie);
        for i in 0..16 {
            prop_assert_eq!(plain[i] ^ cookie[i], salted[i]);
        }
    }
}
