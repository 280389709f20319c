//! Genetic algorithm parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Parent selection method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    /// Roulette wheel weighted by raw path length.
    ///
    /// Longer tours get proportionally more chances to reproduce.
    Roulette,
    /// Tournament selection, the shortest tour of each draw wins
    Tournament,
}

/// Genetic Algorithm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Population size, constant across generations
    pub population_size: usize,
    /// Number of generations
    pub generations: usize,
    /// Probability that a child receives a swap mutation
    pub mutation_prob: f64,
    /// Selection method
    pub selection_type: SelectionType,
    /// Tournament size (only used by `SelectionType::Tournament`)
    pub tournament_size: usize,
    /// Random seed; a fresh one is drawn and logged when absent
    pub seed: Option<u64>,
    /// Log progress every this many generations (0 disables it)
    pub log_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: 100,
            generations: 1000,
            mutation_prob: 0.01,
            selection_type: SelectionType::Roulette,
            tournament_size: 3,
            seed: None,
            log_interval: 100,
        }
    }
}

impl GaConfig {
    /// Reject parameter combinations the algorithm cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::Configuration(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(TspError::Configuration(format!(
                "mutation probability must lie in [0, 1], got {}",
                self.mutation_prob
            )));
        }
        if self.selection_type == SelectionType::Tournament && self.tournament_size == 0 {
            return Err(TspError::Configuration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
