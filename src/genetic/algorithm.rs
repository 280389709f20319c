//! Generational loop.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use super::config::GaConfig;
use super::crossover::ordered_crossover;
use super::individual::Individual;
use super::mutation::swap_mutation;
use super::population::{best_individual, evaluate_population, initialize_population, mean_fitness};
use super::selection::select_parents;
use crate::error::{Result, TspError};
use crate::instance::{DistanceMatrix, Edge, TspInstance};
use crate::solution::Solution;

/// Where the driver currently is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Evaluating,
    Reproducing,
    Terminated,
}

/// Genetic Algorithm implementation
pub struct GeneticAlgorithm {
    config: GaConfig,
    matrix: DistanceMatrix,
    population: Vec<Individual>,
    rng: ChaCha8Rng,
    seed: u64,
    generation: usize,
    phase: Phase,
    history: Vec<f64>,
}

impl GeneticAlgorithm {
    /// Validate the configuration and draw the initial population
    pub fn new(matrix: DistanceMatrix, config: GaConfig) -> Result<Self> {
        config.validate()?;
        if matrix.num_cities() < 2 {
            return Err(TspError::Configuration(format!(
                "at least 2 cities are needed for a tour, got {}",
                matrix.num_cities()
            )));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = initialize_population(config.population_size, matrix.num_cities(), &mut rng);

        log::info!(
            "[GA] Initialized population: {} tours over {} cities (seed {})",
            population.len(),
            matrix.num_cities(),
            seed
        );

        Ok(GeneticAlgorithm {
            config,
            matrix,
            population,
            rng,
            seed,
            generation: 0,
            phase: Phase::Initialized,
            history: Vec::new(),
        })
    }

    pub fn from_instance(instance: &TspInstance, config: GaConfig) -> Result<Self> {
        Self::new(instance.distance_matrix.clone(), config)
    }

    fn evaluate(&mut self) {
        self.phase = Phase::Evaluating;
        evaluate_population(&mut self.population, &self.matrix);
    }

    /// Run one generation: evaluate, carry the best tour over, and breed the rest.
    ///
    /// Returns the best fitness of the evaluated population.
    pub fn step(&mut self) -> Result<f64> {
        self.evaluate();

        let elite = best_individual(&self.population)
            .cloned()
            .ok_or_else(|| TspError::DegenerateEvaluation("population is empty".to_string()))?;
        let best_fitness = elite.fitness;
        log::debug!(
            "[GA] Gen {}  Best {:.3}  Mean {:.3}",
            self.generation,
            best_fitness,
            mean_fitness(&self.population)
        );

        self.phase = Phase::Reproducing;
        let mut next = Vec::with_capacity(self.config.population_size);
        next.push(elite);

        while next.len() < self.config.population_size {
            let (parent1, parent2) = select_parents(
                &self.population,
                self.config.selection_type,
                self.config.tournament_size,
                &mut self.rng,
            )?;
            let mut child = ordered_crossover(parent1, parent2, &mut self.rng);
            swap_mutation(&mut child, self.config.mutation_prob, &mut self.rng);
            next.push(child);
        }

        self.population = next;
        self.generation += 1;
        self.history.push(best_fitness);
        Ok(best_fitness)
    }

    /// Run the genetic algorithm
    pub fn run(&mut self) -> Result<Solution> {
        self.run_with_observer(|_, _| {})
    }

    /// Run the genetic algorithm, calling `observer` after every generation
    /// with the generation count and the individual carried over as elite.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> Result<Solution>
    where
        F: FnMut(usize, &Individual),
    {
        let start = Instant::now();

        while self.generation < self.config.generations {
            let best = self.step()?;
            observer(self.generation, &self.population[0]);

            if self.config.log_interval > 0 && self.generation % self.config.log_interval == 0 {
                log::info!(
                    "[GA] Gen {}  Best length {:.3}  Elapsed {:.2}s",
                    self.generation,
                    best,
                    start.elapsed().as_secs_f64()
                );
            }
        }

        // offspring of the last generation have not been scored yet
        self.evaluate();
        let best = best_individual(&self.population)
            .cloned()
            .ok_or_else(|| TspError::DegenerateEvaluation("population is empty".to_string()))?;
        self.history.push(best.fitness);
        self.phase = Phase::Terminated;

        let mut solution = Solution::from_individual(best, &self.matrix);
        solution.population_size = self.config.population_size;
        solution.generations = self.generation;
        solution.seed = self.seed;
        solution.selection_type = self.config.selection_type;
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.history = self.history.clone();

        log::info!(
            "[GA] Finished after {} generations: best length {:.3} in {:.2}s",
            self.generation,
            solution.fitness(),
            solution.computation_time
        );
        if solution.missing_legs > 0 {
            log::warn!(
                "[GA] Best route crosses {} pair(s) of cities with no road",
                solution.missing_legs
            );
        }

        Ok(solution)
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get current generation
    pub fn current_generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

/// Build the distance matrix from `edges` and return the best tour found
pub fn run(edges: &[Edge], num_cities: usize, config: &GaConfig) -> Result<Individual> {
    let matrix = DistanceMatrix::from_edges(edges, num_cities)?;
    let mut ga = GeneticAlgorithm::new(matrix, config.clone())?;
    Ok(ga.run()?.best)
}
