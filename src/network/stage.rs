//! The recursive structure of a permutation network.

use crate::network::routing::Routing;
use crate::ops::Word;
use crate::tracing_helpers::trace_log;

//-----------------------------------------------------------------------------

/// A permutation network of size `2^k` as a tree of levels.
///
/// Wire `i` of a stage of size `s` is bit `phase + i * (W::BITS / s)` of the word.
/// The tree only exists during construction; [`Stage::into_masks`] folds it into the mask list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Stage<W: Word> {
    /// A level of size `s > 2`: input switches, two inner networks, and output switches.
    Level {
        input: W,
        output: W,
        even: Box<Stage<W>>,
        odd: Box<Stage<W>>,
    },
    /// A single 2-wire switch.
    Switch(W),
}

impl<W: Word> Stage<W> {
    /// Builds the stage for the bijection `targets` of size `2^k` starting at bit `phase`.
    pub fn build(targets: &[usize], phase: usize) -> Stage<W> {
        let size = targets.len();
        if size == 2 {
            return Self::switch(targets, phase);
        }

        let delta = W::BITS / size;
        let Routing { input, output, inner, .. } = Routing::<W>::trace(targets, phase, delta);
        trace_log!(size, phase, input = ?input, output = ?output, "routed level");

        let [even, odd] = inner;
        Stage::Level {
            input: input,
            output: output,
            even: Box::new(Self::build(&even, phase)),
            odd: Box::new(Self::build(&odd, phase + delta)),
        }
    }

    // A switch at bit `phase` is swapped if and only if the wires cross.
    fn switch(targets: &[usize], phase: usize) -> Stage<W> {
        if targets[0] == 1 {
            Stage::Switch(W::bit(phase))
        } else {
            Stage::Switch(W::zero())
        }
    }

    /// Returns the number of masks in the stage.
    pub fn len(&self) -> usize {
        match self {
            Stage::Level { even, .. } => even.len() + 2,
            Stage::Switch(_) => 1,
        }
    }

    /// Folds the stage into a list of masks, one per swap distance.
    ///
    /// The even and the odd network occupy disjoint bits, so their masks at the same depth can be combined with bitwise or.
    pub fn into_masks(self) -> Vec<W> {
        let len = self.len();
        let result = match self {
            Stage::Level { input, output, even, odd } => {
                let even = even.into_masks();
                let odd = odd.into_masks();
                debug_assert_eq!(even.len(), odd.len(), "Inner networks of different depths");
                let mut result: Vec<W> = Vec::with_capacity(len);
                result.push(input);
                result.extend(even.into_iter().zip(odd.into_iter()).map(|(a, b)| a | b));
                result.push(output);
                result
            },
            Stage::Switch(mask) => vec![mask],
        };
        debug_assert_eq!(result.len(), len, "Invalid number of masks");
        result
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches() {
        assert_eq!(Stage::<u64>::build(&[0, 1], 5), Stage::Switch(0u64), "Straight switch was swapped");
        assert_eq!(Stage::<u64>::build(&[1, 0], 5), Stage::Switch(1u64 << 5), "Crossed switch at the wrong bit");
        assert_eq!(Stage::<u64>::build(&[1, 0], 5).into_masks(), vec![1u64 << 5], "Invalid masks for a switch");
    }

    #[test]
    fn four_wires() {
        // The last level of a 64-bit network: wires are bits 2, 18, 34, 50.
        let stage = Stage::<u64>::build(&[1, 0, 3, 2], 2);
        assert_eq!(stage.len(), 3, "Invalid number of masks");
        match &stage {
            Stage::Level { even, odd, .. } => {
                assert!(matches!(**even, Stage::Switch(_)), "Even network is not a switch");
                assert!(matches!(**odd, Stage::Switch(_)), "Odd network is not a switch");
            },
            Stage::Switch(_) => panic!("A 4-wire stage is a single switch"),
        }
        let masks = stage.into_masks();
        assert_eq!(masks.len(), 3, "Invalid number of folded masks");
        // Level switches own pairs (2, 18) and (34, 50); the inner switches own (2, 34) and (18, 50).
        let level_bits = (1u64 << 2) | (1u64 << 34);
        let inner_bits = (1u64 << 2) | (1u64 << 18);
        assert_eq!(masks[0] & !level_bits, 0, "Input mask {:#x} uses bits outside the stage", masks[0]);
        assert_eq!(masks[1] & !inner_bits, 0, "Inner mask {:#x} uses bits outside the stage", masks[1]);
        assert_eq!(masks[2] & !level_bits, 0, "Output mask {:#x} uses bits outside the stage", masks[2]);
    }

    #[test]
    fn identity_is_all_zero() {
        let targets: Vec<usize> = (0..64).collect();
        let stage = Stage::<u64>::build(&targets, 0);
        assert_eq!(stage.len(), 11, "Invalid number of masks");
        assert_eq!(stage.into_masks(), vec![0u64; 11], "Identity produced nonzero masks");
    }

    #[test]
    fn random_mask_lengths() {
        for _ in 0..20 {
            let targets = crate::internal::random_permutation(128);
            let stage = Stage::<u128>::build(targets.as_slice(), 0);
            let len = stage.len();
            assert_eq!(len, 13, "Invalid number of masks");
            assert_eq!(stage.into_masks().len(), len, "Folded mask list differs from the stage depth");
        }
    }

    #[test]
    fn mask_lengths() {
        for log in 1..=6 {
            let size = 1usize << log;
            let targets: Vec<usize> = (0..size).rev().collect();
            let stage = Stage::<u64>::build(&targets, 0);
            assert_eq!(stage.len(), 2 * log - 1, "Invalid number of masks for size {}", size);
            assert_eq!(stage.into_masks().len(), 2 * log - 1, "Invalid number of folded masks for size {}", size);
        }
    }
}

//-----------------------------------------------------------------------------
