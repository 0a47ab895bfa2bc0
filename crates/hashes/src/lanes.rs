//! Four-lane accumulator state and the lane-rotation adapter.
//!
//! Bytes are dealt to the lanes round-robin: byte `i` of the input feeds
//! lane `i % 4`. The fast loops always assign the first byte of a block to
//! lane 0, so before entering one the accumulators are rotated until the lane
//! due for the next byte sits at index 0, and rotated back afterwards.

/// Number of parallel accumulators in the four-lane family.
pub const LANES: usize = 4;

/// djb2 start value for every accumulator.
pub const SEED: u32 = 5381;

/// One djb2 step written as shift-add: `state * 33 + byte`.
#[inline(always)]
pub(crate) const fn djb2_step(state: u32, byte: u8) -> u32 {
    (state << 5).wrapping_add(state).wrapping_add(byte as u32)
}

/// Accumulators plus the index of the lane that receives the next byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LaneState {
    lanes: [u32; LANES],
    next: usize,
}

impl LaneState {
    pub(crate) const fn new() -> Self {
        Self {
            lanes: [SEED; LANES],
            next: 0,
        }
    }

    pub(crate) const fn lanes(&self) -> &[u32; LANES] {
        &self.lanes
    }

    #[cfg(test)]
    pub(crate) const fn next_lane(&self) -> usize {
        self.next
    }

    /// Feeds bytes one at a time, continuing the round-robin.
    #[inline]
    pub(crate) fn absorb(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let lane = &mut self.lanes[self.next];
            *lane = djb2_step(*lane, byte);
            self.next = (self.next + 1) & (LANES - 1);
        }
    }

    /// Runs `fast` over accumulators arranged in block order.
    ///
    /// `fast` must consume a multiple of [`LANES`] bytes so the lane due for
    /// the next byte is unchanged when it returns.
    #[inline]
    pub(crate) fn in_block_order<R>(&mut self, fast: impl FnOnce(&mut [u32; LANES]) -> R) -> R {
        let rotation = LaneRotation::enter(self);
        let result = fast(&mut self.lanes);
        rotation.leave(self);
        result
    }
}

/// Rotation applied on entry to a fast loop; undone by [`leave`](Self::leave).
#[must_use]
struct LaneRotation {
    by: usize,
}

impl LaneRotation {
    fn enter(state: &mut LaneState) -> Self {
        state.lanes.rotate_left(state.next);
        Self { by: state.next }
    }

    fn leave(self, state: &mut LaneState) {
        state.lanes.rotate_right(self.by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_matches_multiply() {
        for state in [0u32, 1, SEED, 0x0800_0000, u32::MAX] {
            for byte in [0u8, 1, 0x41, 0xff] {
                assert_eq!(
                    djb2_step(state, byte),
                    state.wrapping_mul(33).wrapping_add(u32::from(byte))
                );
            }
        }
    }

    #[test]
    fn absorb_deals_bytes_round_robin() {
        let mut state = LaneState::new();
        state.absorb(b"A");
        assert_eq!(state.lanes(), &[SEED * 33 + 65, SEED, SEED, SEED]);
        assert_eq!(state.next_lane(), 1);
        state.absorb(b"BCDE");
        assert_eq!(state.next_lane(), 1);
    }

    #[test]
    fn block_order_puts_next_lane_first_and_restores() {
        let mut state = LaneState::new();
        state.absorb(&[1, 2, 3]);
        let before = *state.lanes();

        let seen = state.in_block_order(|lanes| *lanes);
        assert_eq!(seen, [before[3], before[0], before[1], before[2]]);
        assert_eq!(state.lanes(), &before);
        assert_eq!(state.next_lane(), 3);
    }

    #[test]
    fn block_order_with_whole_block_matches_round_robin() {
        let data = [9u8, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        for prefix in 0..LANES {
            let mut expected = LaneState::new();
            expected.absorb(&data);

            let mut state = LaneState::new();
            state.absorb(&data[..prefix]);
            state.in_block_order(|lanes| {
                for (i, &byte) in data[prefix..prefix + 4].iter().enumerate() {
                    lanes[i] = djb2_step(lanes[i], byte);
                }
            });
            state.absorb(&data[prefix + 4..]);
            assert_eq!(state, expected, "prefix {prefix}");
        }
    }
}
