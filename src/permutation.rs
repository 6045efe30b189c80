//! Bijections on wire indices.
//!
//! A [`Permutation`] of width `n` maps each wire `i` in `0..n` to a distinct target wire `targets[i]` in `0..n`.
//! When applied to a word, the bit at offset `i` moves to offset `targets[i]`.
//! Permutations are validated on construction and immutable afterwards.

use crate::ops::{Permute, Word};
use crate::tracing_helpers::debug_log;
use crate::bits;

use std::convert::TryFrom;
use std::iter::{DoubleEndedIterator, ExactSizeIterator};

use thiserror::Error;


//-----------------------------------------------------------------------------

/// The input is not a valid permutation of the expected width.
///
/// A missing target always comes with a duplicate when the length and the range are valid, so it is reported as [`InvalidPermutation::Duplicate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidPermutation {
    /// The number of wires differs from the expected width.
    #[error("permutation has {len} wires, expected {expected}")]
    WrongLength {
        /// Number of wires in the input.
        len: usize,
        /// Expected width.
        expected: usize,
    },

    /// A wire maps to a target outside `0..width`.
    #[error("wire {index} maps to {target}, which is not in 0..{width}")]
    OutOfRange {
        /// The offending wire.
        index: usize,
        /// Its target.
        target: usize,
        /// Width of the permutation.
        width: usize,
    },

    /// Two wires map to the same target.
    #[error("wire {index} maps to {target}, which is already the target of another wire")]
    Duplicate {
        /// The second wire mapping to `target`.
        index: usize,
        /// The repeated target.
        target: usize,
    },
}

//-----------------------------------------------------------------------------

/// A validated bijection on `0..len`.
///
/// `Permutation` also implements [`Permute`] for every [`Word`] of the same width by moving the bits one at a time.
/// This is slow, but it is the ground truth for [`crate::network::Network`].
///
/// # Examples
///
/// ```
/// use bit_network::permutation::{Permutation, InvalidPermutation};
/// use bit_network::ops::Permute;
///
/// let p = Permutation::new(vec![1, 2, 3, 0, 4, 5, 6, 7]).unwrap();
/// assert_eq!(p.len(), 8);
/// assert_eq!(p.get(3), 0);
/// assert!(!p.is_identity());
/// assert_eq!(p.permute(0b0000_1001u8), 0b0000_0011);
///
/// let inverse = p.inverse();
/// assert_eq!(inverse.as_slice(), &[3, 0, 1, 2, 4, 5, 6, 7]);
/// assert!(p.then(&inverse).unwrap().is_identity());
///
/// assert_eq!(Permutation::new(vec![0, 0]), Err(InvalidPermutation::Duplicate { index: 1, target: 0 }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    targets: Vec<usize>,
}

//-----------------------------------------------------------------------------

impl Permutation {
    /// Creates a permutation from the targets of wires `0..targets.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPermutation`] if `targets` is not a bijection on `0..targets.len()`.
    pub fn new(targets: Vec<usize>) -> Result<Permutation, InvalidPermutation> {
        Self::validate(&targets, targets.len())?;
        Ok(Permutation {
            targets: targets,
        })
    }

    /// Checks that `targets` is a bijection on `0..width`.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: [`InvalidPermutation::WrongLength`] before any entry is inspected, then the first entry that is out of range or repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_network::permutation::{Permutation, InvalidPermutation};
    ///
    /// assert!(Permutation::validate(&[1, 0, 3, 2], 4).is_ok());
    /// assert_eq!(Permutation::validate(&[1, 0], 4), Err(InvalidPermutation::WrongLength { len: 2, expected: 4 }));
    /// assert_eq!(Permutation::validate(&[1, 4, 2, 3], 4), Err(InvalidPermutation::OutOfRange { index: 1, target: 4, width: 4 }));
    /// ```
    pub fn validate(targets: &[usize], width: usize) -> Result<(), InvalidPermutation> {
        if targets.len() != width {
            debug_log!(len = targets.len(), expected = width, "rejected permutation: wrong length");
            return Err(InvalidPermutation::WrongLength { len: targets.len(), expected: width });
        }

        let mut seen = vec![false; width];
        for (index, &target) in targets.iter().enumerate() {
            if target >= width {
                debug_log!(index, target, width, "rejected permutation: target out of range");
                return Err(InvalidPermutation::OutOfRange { index, target, width });
            }
            if seen[target] {
                debug_log!(index, target, "rejected permutation: duplicate target");
                return Err(InvalidPermutation::Duplicate { index, target });
            }
            seen[target] = true;
        }

        Ok(())
    }

    /// Returns the identity permutation of width `width`.
    pub fn identity(width: usize) -> Permutation {
        Permutation {
            targets: (0..width).collect(),
        }
    }

    /// Returns the permutation of width `width` that exchanges wires `first` and `second`.
    ///
    /// # Panics
    ///
    /// Panics if `first >= width` or `second >= width`.
    pub fn transposition(width: usize, first: usize, second: usize) -> Permutation {
        assert!(first < width && second < width, "Permutation::transposition({}, {}, {}): wire out of range", width, first, second);
        let mut result = Self::identity(width);
        result.targets.swap(first, second);
        result
    }

    /// Returns the permutation of width `width` that maps wire `i` to wire `width - 1 - i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_network::permutation::Permutation;
    ///
    /// assert_eq!(Permutation::reversal(4).as_slice(), &[3, 2, 1, 0]);
    /// ```
    pub fn reversal(width: usize) -> Permutation {
        Permutation {
            targets: (0..width).rev().collect(),
        }
    }

    /// Returns the permutation of width `width` that maps wire `i` to wire `(i + shift) % width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_network::permutation::Permutation;
    ///
    /// assert_eq!(Permutation::rotation(4, 1).as_slice(), &[1, 2, 3, 0]);
    /// assert_eq!(Permutation::rotation(4, 6).as_slice(), &[2, 3, 0, 1]);
    /// ```
    pub fn rotation(width: usize, shift: usize) -> Permutation {
        if width == 0 {
            return Self::identity(0);
        }
        let shift = shift % width;
        Permutation {
            targets: (0..width).map(|i| (i + shift) % width).collect(),
        }
    }

    /// Returns the number of wires.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if the permutation has no wires.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns the target of wire `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.targets[index]
    }

    /// Returns an iterator over the targets of wires `0..self.len()`.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.targets.iter().cloned()
    }

    /// Returns the targets as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.targets
    }

    /// Returns `true` if every wire maps to itself.
    pub fn is_identity(&self) -> bool {
        self.iter().enumerate().all(|(index, target)| index == target)
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> Permutation {
        let mut targets = vec![0; self.len()];
        for (index, target) in self.iter().enumerate() {
            targets[target] = index;
        }
        Permutation {
            targets: targets,
        }
    }

    /// Returns the permutation that applies `self` first and `other` second.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPermutation::WrongLength`] if the widths differ.
    pub fn then(&self, other: &Permutation) -> Result<Permutation, InvalidPermutation> {
        if other.len() != self.len() {
            return Err(InvalidPermutation::WrongLength { len: other.len(), expected: self.len() });
        }
        Ok(Permutation {
            targets: self.iter().map(|target| other.get(target)).collect(),
        })
    }
}

//-----------------------------------------------------------------------------

impl<W: Word> Permute<W> for Permutation {
    /// Moves the bits one at a time.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() != W::BITS`.
    fn permute(&self, value: W) -> W {
        assert_eq!(self.len(), W::BITS, "Permutation width does not match the word width");
        let mut result = W::zero();
        for (index, target) in self.iter().enumerate() {
            if bits::get_bit(value, index) {
                result = result | W::bit(target);
            }
        }
        result
    }

    fn width(&self) -> usize {
        self.len()
    }
}

//-----------------------------------------------------------------------------

impl TryFrom<Vec<usize>> for Permutation {
    type Error = InvalidPermutation;

    fn try_from(targets: Vec<usize>) -> Result<Self, Self::Error> {
        Permutation::new(targets)
    }
}

impl TryFrom<&[usize]> for Permutation {
    type Error = InvalidPermutation;

    fn try_from(targets: &[usize]) -> Result<Self, Self::Error> {
        Permutation::new(targets.to_vec())
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(source: Permutation) -> Self {
        source.targets
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        self.as_slice()
    }
}

//-----------------------------------------------------------------------------
