// Utility functions for tests and benchmarks.

use crate::ops::{Permute, Word};
use crate::permutation::Permutation;

use std::time::Duration;

#[cfg(all(test, feature = "tracing"))]
use std::sync::Once;

use rand::Rng;
use rand::distributions::{Distribution, Standard};
use rand::seq::SliceRandom;

//-----------------------------------------------------------------------------

// Returns a uniformly random permutation of width `width`.
pub fn random_permutation(width: usize) -> Permutation {
    let mut targets: Vec<usize> = (0..width).collect();
    let mut rng = rand::thread_rng();
    targets.shuffle(&mut rng);
    Permutation::new(targets).unwrap()
}

// Returns `n` uniformly random permutations of width `width`.
pub fn random_permutations(n: usize, width: usize) -> Vec<Permutation> {
    (0..n).map(|_| random_permutation(width)).collect()
}

// Returns `n` random words.
pub fn random_words<W>(n: usize) -> Vec<W>
where
    W: Word,
    Standard: Distribution<W>,
{
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen()).collect()
}

//-----------------------------------------------------------------------------

// Check that `permuter` agrees with the bit-by-bit reference on the given values.
pub fn check_permuter<W, P>(permuter: &P, truth: &Permutation, values: &[W])
where
    W: Word,
    P: Permute<W>,
{
    assert_eq!(permuter.width(), truth.len(), "Invalid permuter width");
    for value in values.iter() {
        let expected = truth.permute(*value);
        assert_eq!(permuter.permute(*value), expected, "Invalid result for {:#x} with permutation {:?}", value, truth.as_slice());
    }
}

// Check that `permuter` moves every single-bit value to its target.
pub fn check_single_bits<W, P>(permuter: &P, truth: &Permutation)
where
    W: Word,
    P: Permute<W>,
{
    for (index, target) in truth.iter().enumerate() {
        assert_eq!(permuter.permute(W::bit(index)), W::bit(target), "Bit {} not moved to {} by permutation {:?}", index, target, truth.as_slice());
    }
}

//-----------------------------------------------------------------------------

#[cfg(all(test, feature = "tracing"))]
static TRACING: Once = Once::new();

// Installs a global subscriber filtered by `RUST_LOG` (default `warn`) once per process.
// Output goes through the test harness, so it is visible with `--nocapture`.
// Does nothing without the `tracing` feature.
#[cfg(test)]
pub fn init_tracing() {
    #[cfg(feature = "tracing")]
    TRACING.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

//-----------------------------------------------------------------------------

// Prints the time per operation and a checksum that keeps the work from being optimized away.
pub fn report_results(operations: usize, checksum: u64, duration: Duration) {
    let ns = (duration.as_nanos() as f64) / (operations as f64);
    println!("Time:     {:.3} seconds ({:.3} ns / operation)", duration.as_secs_f64(), ns);
    println!("Checksum: {:#018x}", checksum);
    println!("");
}

//-----------------------------------------------------------------------------
