//! Swap mutation.

use rand::prelude::*;

use super::individual::Individual;

/// Default probability that a child is mutated
pub const DEFAULT_MUTATION_PROB: f64 = 0.01;

/// With probability `probability`, swap the genes at two uniformly drawn
/// positions (which may coincide).
///
/// The cached fitness is left stale. Returns whether a swap was performed.
pub fn swap_mutation<R: Rng + ?Sized>(
    individual: &mut Individual,
    probability: f64,
    rng: &mut R,
) -> bool {
    if individual.is_empty() || rng.gen::<f64>() >= probability {
        return false;
    }

    let n = individual.len();
    let a = rng.gen_range(0..n);
    let b = rng.gen_range(0..n);
    individual.chromosome.swap(a, b);
    true
}
