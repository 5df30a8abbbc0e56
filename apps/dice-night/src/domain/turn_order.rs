//! Turn-order shuffling.

use crate::domain::dice::RandomSource;

/// Fisher-Yates shuffle driven by the game's random source.
pub fn shuffle_in_place<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_up_to(i);
        items.swap(i, j);
    }
}

/// Uniform random permutation of `0..len`.
///
/// Every permutation is equally likely given a uniform source.
pub fn random_permutation<R: RandomSource + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    shuffle_in_place(&mut order, rng);
    order
}
