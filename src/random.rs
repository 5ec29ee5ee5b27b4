//! The two randomness primitives every generator is written against.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// A uniformly distributed integer in `[0, n)`.
///
/// Panics if `n` is zero, there is nothing to draw from.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    assert!(n > 0, "random_int requires a non-empty range");
    rng.gen_range(0..n)
}

/// In-place Fisher–Yates shuffle.
///
/// Walks the slice from the back, swapping each position with a uniformly chosen position at
/// or before it, so every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The generators' default random source, seeded for reproducible mazes or from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    }
}
