//! Arbitrary bit permutations with permutation networks.
//!
//! A [`Network`] permutes the bits of a word of `n = 2^k` bits using `2k - 1` masked swaps instead of `n` single-bit moves.
//! The construction is the recursive permutation network described in:
//!
//! > Knuth: The Art of Computer Programming, Volume 4A: Combinatorial Algorithms, Part 1.
//! > Section 7.1.3, pp. 145-147. Addison-Wesley, 2011.
//!
//! The network itself is due to:
//!
//! > Beneš: Mathematical Theory of Connecting Networks and Telephone Traffic.
//! > Academic Press, 1965.
//!
//! A network of size `s` consists of `s / 2` input switches, two inner networks of size `s / 2`, and `s / 2` output switches.
//! Wire `i` of the outermost network is bit `i` of the word.
//! If wire `i` of a network of size `s` is bit `phase + i * delta`, the even inner network starts at bit `phase` and the odd one at bit `phase + delta`, both with spacing `2 * delta`.
//! The recursion ends with single 2-wire switches.
//!
//! Every switch swaps two bits at distance `delta`, and all switches at the same depth share the distance.
//! Hence each depth becomes one masked swap, and the swap distances are `1, 2, ..., n/2, ..., 2, 1`.
//! The inner networks occupy disjoint bits, so their masks can be merged with bitwise or.
//!
//! Switch settings for a level are found by tracing cycles through the permutation.
//! See `routing` for details.

use crate::network::stage::Stage;
use crate::ops::{Permute, Word};
use crate::permutation::{InvalidPermutation, Permutation};
use crate::tracing_helpers::debug_log;
use crate::bits;

use std::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator};

mod routing;
mod stage;


//-----------------------------------------------------------------------------

/// A permutation network for the bits of a [`Word`].
///
/// The network is built once from a [`Permutation`] and is immutable afterwards.
/// Applying it to a word moves the bit at offset `i` to offset `permutation.get(i)` with [`Word::STAGES`] masked swaps.
/// Swaps with an empty mask are skipped.
///
/// # Examples
///
/// ```
/// use bit_network::network::Network;
/// use bit_network::ops::Word;
/// use bit_network::permutation::Permutation;
///
/// // Rotate a 4-cycle on the lowest bits.
/// let mut targets: Vec<usize> = (0..64).collect();
/// targets[0] = 1; targets[1] = 2; targets[2] = 3; targets[3] = 0;
/// let network = Network::<u64>::from_targets(&targets).unwrap();
/// assert_eq!(network.permute(1), 2);
/// assert_eq!(network.permute(8), 1);
/// assert_eq!(network.permute(9), 3);
/// assert_eq!(network.masks().len(), <u64 as Word>::STAGES);
///
/// // The inverse network undoes the permutation.
/// let inverse = network.inverse();
/// assert_eq!(inverse.permute(network.permute(0xDEAD_BEEF)), 0xDEAD_BEEF);
///
/// // Bit reversal of a byte.
/// let reverse = Network::<u8>::new(&Permutation::reversal(8)).unwrap();
/// assert_eq!(reverse.permute(0b0000_0111), 0b1110_0000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network<W: Word> {
    // One mask per swap distance.
    masks: Vec<W>,
}

//-----------------------------------------------------------------------------

impl<W: Word> Network<W> {
    /// Builds a network for the permutation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPermutation::WrongLength`] if the width of the permutation is not `W::BITS`.
    pub fn new(permutation: &Permutation) -> Result<Network<W>, InvalidPermutation> {
        if permutation.len() != W::BITS {
            debug_log!(len = permutation.len(), expected = W::BITS, "rejected permutation: wrong length");
            return Err(InvalidPermutation::WrongLength { len: permutation.len(), expected: W::BITS });
        }
        Ok(Self::build(permutation.as_slice()))
    }

    /// Validates the targets of wires `0..W::BITS` and builds a network for them.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPermutation`] if `targets` is not a bijection on `0..W::BITS`.
    /// No construction work is done in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_network::network::Network;
    /// use bit_network::permutation::InvalidPermutation;
    ///
    /// let targets: Vec<usize> = (0..32).collect();
    /// assert!(Network::<u32>::from_targets(&targets).unwrap().is_identity());
    /// assert_eq!(Network::<u64>::from_targets(&targets), Err(InvalidPermutation::WrongLength { len: 32, expected: 64 }));
    /// ```
    pub fn from_targets(targets: &[usize]) -> Result<Network<W>, InvalidPermutation> {
        Permutation::validate(targets, W::BITS)?;
        Ok(Self::build(targets))
    }

    // Builds the network for validated targets.
    fn build(targets: &[usize]) -> Network<W> {
        debug_log!(width = W::BITS, "building permutation network");
        let masks = Stage::<W>::build(targets, 0).into_masks();
        debug_assert_eq!(masks.len(), W::STAGES, "Invalid number of masks");
        Network {
            masks: masks,
        }
    }

    /// Returns the identity network.
    pub fn identity() -> Network<W> {
        Network {
            masks: vec![W::zero(); W::STAGES],
        }
    }

    /// Returns a network for the inverse permutation.
    ///
    /// The swap distances form a palindrome and each masked swap is its own inverse, so the inverse network uses the same masks in reverse order.
    pub fn inverse(&self) -> Network<W> {
        Network {
            masks: self.masks.iter().rev().cloned().collect(),
        }
    }

    /// Returns the permuted value.
    #[inline]
    pub fn permute(&self, value: W) -> W {
        let mut result = value;
        for (distance, mask) in self.stages() {
            if mask != W::zero() {
                result = bits::swap_masked(result, distance, mask);
            }
        }
        result
    }

    /// Returns the number of wires, which is `W::BITS`.
    #[inline]
    pub fn width(&self) -> usize {
        W::BITS
    }

    /// Returns the masks in the order they are applied.
    #[inline]
    pub fn masks(&self) -> &[W] {
        &self.masks
    }

    /// Returns an iterator over the swap distances in the order they are applied.
    pub fn distances(&self) -> Distances {
        Distances::new(W::BITS)
    }

    /// Returns an iterator over `(distance, mask)` pairs in the order they are applied.
    pub fn stages(&self) -> impl DoubleEndedIterator<Item = (usize, W)> + ExactSizeIterator + '_ {
        self.distances().zip(self.masks.iter().cloned())
    }

    /// Returns the number of masked swaps a call to [`Network::permute`] performs.
    pub fn swap_count(&self) -> usize {
        self.masks.iter().filter(|mask| **mask != W::zero()).count()
    }

    /// Returns `true` if the network does not change any bits.
    pub fn is_identity(&self) -> bool {
        self.swap_count() == 0
    }
}

//-----------------------------------------------------------------------------

impl<W: Word> Permute<W> for Network<W> {
    #[inline]
    fn permute(&self, value: W) -> W {
        Network::permute(self, value)
    }
}

impl<W: Word> Default for Network<W> {
    fn default() -> Self {
        Self::identity()
    }
}

//-----------------------------------------------------------------------------

/// The swap distances of a permutation network of width `2^k`.
///
/// The sequence is `1, 2, 4, ..., 2^(k-1), 2^(k-2), ..., 2, 1` of length `2k - 1`.
/// It depends only on the width.
///
/// # Examples
///
/// ```
/// use bit_network::network::Distances;
///
/// let distances: Vec<usize> = Distances::new(16).collect();
/// assert_eq!(distances, vec![1, 2, 4, 8, 4, 2, 1]);
/// assert_eq!(Distances::new(64).len(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct Distances {
    levels: usize,
    // The first index we have not visited.
    next: usize,
    // The first index we should not visit.
    limit: usize,
}

impl Distances {
    /// Returns the swap distances for width `width`.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not a power of two or `width < 2`.
    pub fn new(width: usize) -> Distances {
        assert!(width >= 2 && width.is_power_of_two(), "Distances::new({}): width must be a power of two >= 2", width);
        let levels = bits::log2(width);
        Distances {
            levels: levels,
            next: 0,
            limit: 2 * levels - 1,
        }
    }

    fn distance(&self, index: usize) -> usize {
        if index < self.levels {
            1 << index
        } else {
            1 << (2 * self.levels - 2 - index)
        }
    }
}

impl Iterator for Distances {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            None
        } else {
            let result = self.distance(self.next);
            self.next += 1;
            Some(result)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit - self.next;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Distances {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            None
        } else {
            self.limit -= 1;
            Some(self.distance(self.limit))
        }
    }
}

impl ExactSizeIterator for Distances {}

impl FusedIterator for Distances {}

//-----------------------------------------------------------------------------
