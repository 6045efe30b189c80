//! # Bit permutation networks
//!
//! This crate permutes the bits of a machine word according to an arbitrary permutation.
//! A [`network::Network`] is built once for the permutation, and each application costs `2 log2(n) - 1` masked swaps on an `n`-bit word instead of `n` single-bit moves.
//!
//! # Example
//!
//! ```
//! use bit_network::network::Network;
//! use bit_network::permutation::Permutation;
//!
//! // Move bit i to bit 63 - i.
//! let network = Network::<u64>::new(&Permutation::reversal(64)).unwrap();
//! assert_eq!(network.permute(0b1011), 0b1101 << 60);
//! ```
//!
//! # Notes
//!
//! * Supported word types are `u8`, `u16`, `u32`, `u64`, and `u128`.
//! * Networks are immutable and can be shared between threads.
//! * Construction traces are available with the `tracing` feature.

pub mod bits;
pub mod network;
pub mod ops;
pub mod permutation;

mod tracing_helpers;

#[cfg(any(test, feature = "bench"))]
#[doc(hidden)]
pub mod internal;
