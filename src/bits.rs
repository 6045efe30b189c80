//! Low-level functions for bit manipulation.
//!
//! All functions are generic over [`Word`] and use the least significant bit as offset 0.

use crate::ops::Word;

//-----------------------------------------------------------------------------

/// Swaps pairs of bits at distance `distance`.
///
/// Each set bit of `mask` marks the lower bit of a pair: the bit at offset `p` is exchanged with the bit at offset `p + distance`.
/// All other bits are left unchanged.
///
/// Behavior is undefined if `distance >= W::BITS`.
/// The result is meaningless if `mask` has a bit set at `p` with `p + distance >= W::BITS`, or if `mask & (mask << distance) != 0`.
///
/// # Examples
///
/// ```
/// use bit_network::bits;
///
/// // Swap bits 0 <-> 4 and 2 <-> 6.
/// assert_eq!(bits::swap_masked(0b0000_0101u8, 4, 0b0000_0101), 0b0101_0000);
/// assert_eq!(bits::swap_masked(0b0001_0100u8, 4, 0b0000_0101), 0b0100_0001);
/// assert_eq!(bits::swap_masked(0b1111_1111u8, 4, 0b0000_0101), 0b1111_1111);
/// ```
#[inline]
pub fn swap_masked<W: Word>(value: W, distance: usize, mask: W) -> W {
    let diff = (value ^ (value >> distance)) & mask;
    value ^ diff ^ (diff << distance)
}

/// Swaps the bits at offsets `first` and `second`.
///
/// # Examples
///
/// ```
/// use bit_network::bits;
///
/// assert_eq!(bits::swap_bits(2u64, 0, 1), 1);
/// assert_eq!(bits::swap_bits(2u64, 1, 0), 1);
/// assert_eq!(bits::swap_bits(6u64, 0, 1), 5);
/// assert_eq!(bits::swap_bits(8u64, 0, 1), 8);
/// ```
///
/// # Panics
///
/// May panic if `first >= W::BITS` or `second >= W::BITS`.
#[inline]
pub fn swap_bits<W: Word>(value: W, first: usize, second: usize) -> W {
    if first == second {
        return value;
    }
    let (low, high) = if first < second { (first, second) } else { (second, first) };
    swap_masked(value, high - low, W::bit(low))
}

/// Returns the bit at offset `index`.
///
/// # Examples
///
/// ```
/// use bit_network::bits;
///
/// assert!(bits::get_bit(0b100u32, 2));
/// assert!(!bits::get_bit(0b100u32, 1));
/// ```
///
/// # Panics
///
/// May panic if `index >= W::BITS`.
#[inline]
pub fn get_bit<W: Word>(value: W, index: usize) -> bool {
    (value >> index) & W::one() == W::one()
}

/// Returns `log2(width)` for a power-of-two width.
///
/// # Examples
///
/// ```
/// use bit_network::bits;
///
/// assert_eq!(bits::log2(64), 6);
/// assert_eq!(bits::log2(2), 1);
/// ```
///
/// # Panics
///
/// May panic if `width` is not a power of two.
#[inline]
pub fn log2(width: usize) -> usize {
    debug_assert!(width.is_power_of_two(), "log2({}): not a power of two", width);
    width.trailing_zeros() as usize
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    // Swaps two bits by reading and writing them individually.
    fn naive_swap(value: u64, first: usize, second: usize) -> u64 {
        let a = (value >> first) & 1;
        let b = (value >> second) & 1;
        let cleared = value & !((1u64 << first) | (1u64 << second));
        cleared | (a << second) | (b << first)
    }

    #[test]
    fn swap_bits_test() {
        assert_eq!(swap_bits(2u64, 0, 1), 1, "swap_bits(2, 0, 1) failed");
        assert_eq!(swap_bits(2u64, 1, 0), 1, "swap_bits(2, 1, 0) failed");
        assert_eq!(swap_bits(3u64, 0, 1), 3, "swap_bits(3, 0, 1) failed");
        assert_eq!(swap_bits(3u64, 1, 0), 3, "swap_bits(3, 1, 0) failed");
        assert_eq!(swap_bits(6u64, 0, 1), 5, "swap_bits(6, 0, 1) failed");
        assert_eq!(swap_bits(8u64, 0, 1), 8, "swap_bits(8, 0, 1) failed");
        assert_eq!(swap_bits(1u64, 0, 63), 1u64 << 63, "swap_bits(1, 0, 63) failed");
        assert_eq!(swap_bits(5u8, 2, 2), 5, "swap_bits(5, 2, 2) failed");
    }

    #[test]
    fn random_swaps() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let value: u64 = rng.gen();
            let first = rng.gen_range(0, 64);
            let second = rng.gen_range(0, 64);
            assert_eq!(swap_bits(value, first, second), naive_swap(value, first, second),
                "swap_bits({:X}, {}, {}) failed", value, first, second);
        }
    }

    #[test]
    fn swap_masked_test() {
        // All adjacent pairs.
        assert_eq!(swap_masked(0x5555_5555_5555_5555u64, 1, 0x5555_5555_5555_5555), 0xAAAA_AAAA_AAAA_AAAA);
        // Halves of the word.
        assert_eq!(swap_masked(0x0000_0000_FFFF_FFFFu64, 32, 0x0000_0000_FFFF_FFFF), 0xFFFF_FFFF_0000_0000);
        // Empty mask changes nothing.
        assert_eq!(swap_masked(0x1234_5678u32, 8, 0), 0x1234_5678);
        // u128 halves.
        assert_eq!(swap_masked(1u128, 64, 1), 1u128 << 64);
    }

    #[test]
    fn swap_masked_is_involution() {
        let mut rng = rand::thread_rng();
        for distance in [1usize, 2, 4, 8, 16, 32].iter() {
            // Lower bit of each pair in blocks of 2 * distance.
            let mut mask: u64 = 0;
            for offset in 0..64 {
                if offset % (2 * distance) < *distance && rng.gen::<bool>() {
                    mask |= 1u64 << offset;
                }
            }
            let value: u64 = rng.gen();
            let once = swap_masked(value, *distance, mask);
            assert_eq!(once.count_ones(), value.count_ones(), "swap_masked changed the number of ones at distance {}", distance);
            assert_eq!(swap_masked(once, *distance, mask), value, "swap_masked is not an involution at distance {}", distance);
        }
    }

    #[test]
    fn get_bit_test() {
        let value: u64 = 0x8000_0010_0000_0001;
        for i in 0..64 {
            let truth = i == 0 || i == 36 || i == 63;
            assert_eq!(get_bit(value, i), truth, "get_bit({:X}, {}) failed", value, i);
        }
    }

    #[test]
    fn log2_test() {
        assert_eq!(log2(2), 1, "log2(2) failed");
        assert_eq!(log2(8), 3, "log2(8) failed");
        assert_eq!(log2(128), 7, "log2(128) failed");
    }
}

//-----------------------------------------------------------------------------
