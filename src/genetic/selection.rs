//! Parent selection.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use super::config::SelectionType;
use super::individual::Individual;
use crate::error::{Result, TspError};

/// Roulette wheel selection of two parents.
///
/// Each parent is drawn independently, with replacement, with probability
/// `fitness_i / sum(fitness)`. Since fitness is a path length, longer tours
/// are favoured. The population must have been evaluated.
pub fn roulette_select<'a, R: Rng + ?Sized>(
    population: &'a [Individual],
    rng: &mut R,
) -> Result<(&'a Individual, &'a Individual)> {
    if population.is_empty() {
        return Err(TspError::DegenerateEvaluation("population is empty".to_string()));
    }

    let total: f64 = population.iter().map(|ind| ind.fitness).sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(TspError::DegenerateEvaluation(format!(
            "fitness sum is {}, cannot form roulette proportions",
            total
        )));
    }

    let wheel = WeightedIndex::new(population.iter().map(|ind| ind.fitness))
        .map_err(|e| TspError::DegenerateEvaluation(e.to_string()))?;

    let first = &population[wheel.sample(rng)];
    let second = &population[wheel.sample(rng)];
    Ok((first, second))
}

/// Tournament selection of two parents
pub fn tournament_select<'a, R: Rng + ?Sized>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Result<(&'a Individual, &'a Individual)> {
    if population.is_empty() {
        return Err(TspError::DegenerateEvaluation("population is empty".to_string()));
    }

    let mut pick = || {
        let mut best = rng.gen_range(0..population.len());
        for _ in 1..tournament_size {
            let idx = rng.gen_range(0..population.len());
            if population[idx].fitness < population[best].fitness {
                best = idx;
            }
        }
        best
    };

    let first = pick();
    let second = pick();
    Ok((&population[first], &population[second]))
}

/// Select two parents using the configured method
pub fn select_parents<'a, R: Rng + ?Sized>(
    population: &'a [Individual],
    selection_type: SelectionType,
    tournament_size: usize,
    rng: &mut R,
) -> Result<(&'a Individual, &'a Individual)> {
    match selection_type {
        SelectionType::Roulette => roulette_select(population, rng),
        SelectionType::Tournament => tournament_select(population, tournament_size, rng),
    }
}
