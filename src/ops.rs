//! Operations common to bit permuters.

use num_traits::{PrimInt, Unsigned};

use std::fmt::{Binary, Debug, LowerHex};
use std::mem;

//-----------------------------------------------------------------------------

/// An unsigned machine word whose bits can be permuted.
///
/// The width of the word is always a power of two, and the bits are indexed from the least
/// significant bit.
/// This trait is implemented for `u8`, `u16`, `u32`, `u64`, and `u128`.
///
/// # Examples
///
/// ```
/// use bit_network::ops::Word;
///
/// assert_eq!(<u8 as Word>::BITS, 8);
/// assert_eq!(<u64 as Word>::BITS, 64);
/// assert_eq!(<u64 as Word>::STAGES, 11);
/// ```
pub trait Word: PrimInt + Unsigned + Debug + Binary + LowerHex + Send + Sync + 'static {
    /// Number of bits in the word.
    const BITS: usize;

    /// Number of masked swaps in a permutation network for this word.
    ///
    /// This is `2 * log2(BITS) - 1`.
    const STAGES: usize = 2 * (Self::BITS.trailing_zeros() as usize) - 1;

    /// Returns the word with only bit `index` set.
    ///
    /// Behavior is undefined if `index >= Self::BITS`.
    #[inline]
    fn bit(index: usize) -> Self {
        Self::one() << index
    }
}

macro_rules! word_impl {
    ($t:ident) => {
        impl Word for $t {
            const BITS: usize = mem::size_of::<$t>() * 8;
        }
    };
}

word_impl!(u8);
word_impl!(u16);
word_impl!(u32);
word_impl!(u64);
word_impl!(u128);

//-----------------------------------------------------------------------------

/// A bit permutation that can be applied to words of type `W`.
///
/// For every wire `i`, the bit at offset `i` of the input ends up at offset `target(i)` of the output.
///
/// # Example
///
/// ```
/// use bit_network::ops::Permute;
///
/// // Swaps the two lowest bits of a byte.
/// struct LowSwap;
///
/// impl Permute<u8> for LowSwap {
///     fn permute(&self, value: u8) -> u8 {
///         (value & 0xFC) | ((value & 1) << 1) | ((value >> 1) & 1)
///     }
/// }
///
/// assert_eq!(LowSwap.permute(0b01), 0b10);
/// assert_eq!(LowSwap.permute(0b111), 0b111);
/// ```
pub trait Permute<W: Word> {
    /// Returns the permuted value.
    fn permute(&self, value: W) -> W;

    /// Returns the number of wires in the permutation.
    fn width(&self) -> usize {
        W::BITS
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_widths() {
        assert_eq!(<u8 as Word>::BITS, 8, "Invalid width for u8");
        assert_eq!(<u16 as Word>::BITS, 16, "Invalid width for u16");
        assert_eq!(<u32 as Word>::BITS, 32, "Invalid width for u32");
        assert_eq!(<u64 as Word>::BITS, 64, "Invalid width for u64");
        assert_eq!(<u128 as Word>::BITS, 128, "Invalid width for u128");
    }

    #[test]
    fn stage_counts() {
        assert_eq!(<u8 as Word>::STAGES, 5, "Invalid stage count for u8");
        assert_eq!(<u32 as Word>::STAGES, 9, "Invalid stage count for u32");
        assert_eq!(<u64 as Word>::STAGES, 11, "Invalid stage count for u64");
        assert_eq!(<u128 as Word>::STAGES, 13, "Invalid stage count for u128");
    }

    #[test]
    fn single_bits() {
        assert_eq!(<u8 as Word>::bit(7), 0x80, "Invalid bit 7 of u8");
        assert_eq!(<u64 as Word>::bit(0), 1, "Invalid bit 0 of u64");
        assert_eq!(<u128 as Word>::bit(127), 1u128 << 127, "Invalid bit 127 of u128");
    }
}

//-----------------------------------------------------------------------------
