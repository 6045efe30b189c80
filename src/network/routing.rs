//! Routing a single level of a permutation network.
//!
//! A level of size `s` consists of `s / 2` input switches, two inner networks of size `s / 2`, and `s / 2` output switches.
//! Input switch `j` owns wires `2j` and `2j + 1`.
//! When the switch is straight, wire `2j` enters the even network and wire `2j + 1` enters the odd network, both as inner wire `j`.
//! Output switches work in the same way in reverse.
//!
//! The routing is found by tracing cycles.
//! If wire `w` enters the even network, its switch partner `w ^ 1` must enter the odd network.
//! The output next to the target of `w ^ 1` must then be reached through the even network, which determines the next input wire.
//! The cycle closes when we return to the wire it started from.

use crate::ops::Word;

//-----------------------------------------------------------------------------

const EVEN: usize = 0;
const ODD: usize = 1;

/// Switch settings and inner permutations for one level.
///
/// Wire `i` of the level is bit `phase + i * delta` of the word.
/// The masks mark the lower bit of each swapped switch, and the swaps happen at distance `delta`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Routing<W: Word> {
    pub input: W,
    pub output: W,
    // Inner permutations for the even and the odd network.
    pub inner: [Vec<usize>; 2],
    phase: usize,
    delta: usize,
}

impl<W: Word> Routing<W> {
    /// Routes `targets`, which must be a bijection of even length.
    pub fn trace(targets: &[usize], phase: usize, delta: usize) -> Routing<W> {
        let size = targets.len();
        debug_assert!(size >= 2 && size % 2 == 0, "Routing::trace(): invalid level size {}", size);

        let mut sources = vec![0; size];
        for (wire, &target) in targets.iter().enumerate() {
            sources[target] = wire;
        }

        let mut result = Routing {
            input: W::zero(),
            output: W::zero(),
            inner: [vec![0; size / 2], vec![0; size / 2]],
            phase: phase,
            delta: delta,
        };

        // Each iteration maps both wires of an input switch.
        let mut mapped = vec![false; size];
        for start in (0..size).step_by(2) {
            if mapped[start] {
                continue;
            }
            let mut wire = start;
            loop {
                let partner = wire ^ 1;
                result.connect(wire, targets[wire], EVEN);
                result.connect(partner, targets[partner], ODD);
                mapped[wire] = true;
                mapped[partner] = true;

                wire = sources[targets[partner] ^ 1];
                if mapped[wire] {
                    break;
                }
            }
        }

        result
    }

    // Sends `wire` through `network` to `target`, swapping the switches on both sides if necessary.
    fn connect(&mut self, wire: usize, target: usize, network: usize) {
        if wire & 1 != network {
            self.input = self.input | self.switch_bit(wire);
        }
        if target & 1 != network {
            self.output = self.output | self.switch_bit(target);
        }
        self.inner[network][wire >> 1] = target >> 1;
    }

    // The mask bit for the switch that owns `wire`.
    fn switch_bit(&self, wire: usize) -> W {
        W::bit(self.phase + (wire & !1) * self.delta)
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal;
    use crate::permutation::Permutation;

    fn check_bijection(inner: &[usize], size: usize) {
        assert!(Permutation::validate(inner, size).is_ok(), "Inner permutation {:?} is not a bijection on 0..{}", inner, size);
    }

    // Applies the routing to wire `wire` and returns the output wire it reaches.
    fn follow(routing: &Routing<u64>, wire: usize) -> usize {
        let switch = wire >> 1;
        let swapped_in = routing.input & routing.switch_bit(wire) != 0;
        let network = (wire & 1) ^ (swapped_in as usize);
        let inner_target = routing.inner[network][switch];
        let swapped_out = routing.output & routing.switch_bit(2 * inner_target) != 0;
        2 * inner_target + (network ^ (swapped_out as usize))
    }

    #[test]
    fn identity_needs_no_swaps() {
        let targets: Vec<usize> = (0..64).collect();
        let routing: Routing<u64> = Routing::trace(&targets, 0, 1);
        assert_eq!(routing.input, 0, "Identity swapped input switches");
        assert_eq!(routing.output, 0, "Identity swapped output switches");
        let half: Vec<usize> = (0..32).collect();
        assert_eq!(routing.inner[EVEN], half, "Invalid even network for the identity");
        assert_eq!(routing.inner[ODD], half, "Invalid odd network for the identity");
    }

    #[test]
    fn adjacent_swap() {
        let mut targets: Vec<usize> = (0..64).collect();
        targets.swap(0, 1);
        let routing: Routing<u64> = Routing::trace(&targets, 0, 1);
        assert_eq!(routing.input, 0, "Unnecessary input swaps");
        assert_eq!(routing.output, 1, "Invalid output swaps");
    }

    #[test]
    fn phase_and_delta() {
        // Size 4 level at phase 3 with spacing 16: wires are bits 3, 19, 35, 51.
        let routing: Routing<u64> = Routing::trace(&[1, 0, 2, 3], 3, 16);
        assert_eq!(routing.input, 0, "Unnecessary input swaps");
        assert_eq!(routing.output, 1u64 << 3, "Output swap at the wrong bit");

        let routing: Routing<u64> = Routing::trace(&[0, 1, 3, 2], 3, 16);
        assert_eq!(routing.output, 1u64 << 35, "Output swap at the wrong bit");
    }

    #[test]
    fn random_levels() {
        for size in [2usize, 4, 8, 16, 32, 64].iter() {
            let delta = 64 / size;
            for phase in 0..delta {
                let truth = internal::random_permutation(*size);
                let routing: Routing<u64> = Routing::trace(truth.as_slice(), phase, delta);
                check_bijection(&routing.inner[EVEN], size / 2);
                check_bijection(&routing.inner[ODD], size / 2);
                for wire in 0..*size {
                    assert_eq!(follow(&routing, wire), truth.get(wire), "Wire {} misrouted (size {}, phase {})", wire, size, phase);
                }
            }
        }
    }
}

//-----------------------------------------------------------------------------
