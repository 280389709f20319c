//! Population creation and fitness evaluation.

use ordered_float::OrderedFloat;
use rand::prelude::*;
use rayon::prelude::*;

use super::individual::Individual;
use crate::instance::DistanceMatrix;

/// Create `size` individuals, each an independent uniform shuffle of `1..=num_cities`.
///
/// Two individuals may end up with the same permutation.
pub fn initialize_population<R: Rng + ?Sized>(
    size: usize,
    num_cities: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..size)
        .map(|_| {
            let mut chromosome: Vec<usize> = (1..=num_cities).collect();
            chromosome.shuffle(rng);
            Individual::new(chromosome)
        })
        .collect()
}

/// Recompute the fitness of every individual in place
pub fn evaluate_population(population: &mut [Individual], matrix: &DistanceMatrix) {
    population
        .par_iter_mut()
        .for_each(|individual| {
            individual.compute_fitness(matrix);
        });
}

/// Individual with the smallest fitness; the earliest one wins ties
pub fn best_individual(population: &[Individual]) -> Option<&Individual> {
    population.iter().min_by_key(|ind| OrderedFloat(ind.fitness))
}

/// Average fitness of the population
pub fn mean_fitness(population: &[Individual]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(|ind| ind.fitness).sum::<f64>() / population.len() as f64
}
