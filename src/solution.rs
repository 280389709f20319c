//! Solution representation and reporting.
//!
//! A `Solution` wraps the best tour found by a run together with the
//! metadata needed to reproduce and compare it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, TspError};
use crate::genetic::config::SelectionType;
use crate::genetic::individual::Individual;
use crate::instance::DistanceMatrix;

/// Result of one genetic algorithm run
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Best individual of the final population
    pub best: Individual,
    /// Route rendered as `a-b-c`
    pub route: String,
    /// Legs of the route between cities with no road
    pub missing_legs: usize,
    /// Number of cities in the instance
    pub num_cities: usize,
    /// Population size used
    pub population_size: usize,
    /// Generations performed
    pub generations: usize,
    /// Seed that reproduces this run
    pub seed: u64,
    /// Selection method used
    pub selection_type: SelectionType,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Best fitness at the start of every generation, then the final best
    pub history: Vec<f64>,
    /// When the run finished
    pub solved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct HistoryRecord {
    generation: usize,
    best_fitness: f64,
}

impl Solution {
    /// Create a solution from the best individual of a run
    pub fn from_individual(best: Individual, matrix: &DistanceMatrix) -> Self {
        Solution {
            route: best.route(),
            missing_legs: best.missing_legs(matrix),
            num_cities: matrix.num_cities(),
            best,
            population_size: 0,
            generations: 0,
            seed: 0,
            selection_type: SelectionType::Roulette,
            computation_time: 0.0,
            history: Vec::new(),
            solved_at: Utc::now(),
        }
    }

    /// Total path length of the best tour
    pub fn fitness(&self) -> f64 {
        self.best.fitness
    }

    pub fn tour(&self) -> &[usize] {
        &self.best.chromosome
    }

    /// Fail when the route relies on city pairs without a road
    pub fn ensure_connected(&self) -> Result<()> {
        if self.missing_legs > 0 {
            return Err(TspError::DisconnectedRoute { missing_legs: self.missing_legs });
        }
        Ok(())
    }

    /// Write the solution as pretty JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Export the convergence history to CSV
    pub fn export_history_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for (generation, &best_fitness) in self.history.iter().enumerate() {
            writer.serialize(HistoryRecord { generation, best_fitness })?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution (GeneticAlgorithm, {:?} selection)", self.selection_type)?;
        writeln!(f, "  Length: {:.2}", self.best.fitness)?;
        writeln!(f, "  Cities: {}", self.num_cities)?;
        writeln!(f, "  Generations: {}", self.generations)?;
        writeln!(f, "  Population: {}", self.population_size)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if self.missing_legs > 0 {
            writeln!(f, "  Missing roads on route: {}", self.missing_legs)?;
        }
        writeln!(f, "  Route: {}", self.route)
    }
}
