//! Repeated-run benchmarking.
//!
//! The genetic algorithm is stochastic, so a single run says little about
//! its quality. A `Benchmark` repeats it with consecutive seeds and
//! aggregates the tour lengths.

use serde::Serialize;
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::genetic::algorithm::GeneticAlgorithm;
use crate::genetic::config::GaConfig;
use crate::instance::TspInstance;

/// Result of a single seeded run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Instance name
    pub instance: String,
    /// Run index (0-based)
    pub run: usize,
    /// Seed used for this run
    pub seed: u64,
    /// Best tour length found
    pub fitness: f64,
    /// Legs of the best route with no road
    pub missing_legs: usize,
    /// Best route, `a-b-c`
    pub route: String,
    /// Computation time in seconds
    pub time: f64,
}

/// Aggregated statistics over all runs
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkStatistics {
    pub instance: String,
    pub runs: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub mean_time: f64,
    pub best_route: String,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of runs
    pub num_runs: usize,
    /// Seed of the first run; run `i` uses `base_seed + i`
    pub base_seed: u64,
    /// Parameters shared by every run (its seed is overridden)
    pub ga: GaConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 5,
            base_seed: 42,
            ga: GaConfig::default(),
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    /// Perform run number `run` on the instance and record it
    pub fn run_single(&mut self, instance: &TspInstance, run: usize) -> Result<&RunResult> {
        let seed = self.config.base_seed.wrapping_add(run as u64);
        let config = GaConfig {
            seed: Some(seed),
            ..self.config.ga.clone()
        };

        let solution = GeneticAlgorithm::from_instance(instance, config)?.run()?;
        log::debug!("Run {} (seed {}): {:.3}", run, seed, solution.fitness());

        self.results.push(RunResult {
            instance: instance.name.clone(),
            run,
            seed,
            fitness: solution.fitness(),
            missing_legs: solution.missing_legs,
            route: solution.route,
            time: solution.computation_time,
        });

        let last = self.results.len() - 1;
        Ok(&self.results[last])
    }

    /// Perform every configured run on the instance
    pub fn run(&mut self, instance: &TspInstance) -> Result<()> {
        log::info!(
            "Running benchmark on instance: {} ({} runs)",
            instance.name,
            self.config.num_runs
        );

        for run in 0..self.config.num_runs {
            self.run_single(instance, run)?;
        }
        Ok(())
    }

    /// Aggregate the recorded runs, `None` before any run
    pub fn compute_statistics(&self) -> Option<BenchmarkStatistics> {
        let best_run = self.results
            .iter()
            .min_by(|a, b| a.fitness.total_cmp(&b.fitness))?;

        let fitnesses: Vec<f64> = self.results.iter().map(|r| r.fitness).collect();
        let times: Vec<f64> = self.results.iter().map(|r| r.time).collect();

        let std_dev = if fitnesses.len() > 1 {
            fitnesses.iter().std_dev()
        } else {
            0.0
        };

        Some(BenchmarkStatistics {
            instance: best_run.instance.clone(),
            runs: self.results.len(),
            best: best_run.fitness,
            worst: fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            mean: fitnesses.iter().mean(),
            std_dev,
            mean_time: times.iter().mean(),
            best_route: best_run.route.clone(),
        })
    }

    /// Export per-run results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("       TSP Genetic Benchmark Report\n");
        report.push_str("========================================\n\n");

        let Some(stats) = self.compute_statistics() else {
            report.push_str("No runs recorded.\n");
            return report;
        };

        report.push_str(&format!("Instance: {}\n", stats.instance));
        report.push_str(&format!(
            "Population: {}  Generations: {}  Mutation: {}\n\n",
            self.config.ga.population_size, self.config.ga.generations, self.config.ga.mutation_prob
        ));

        report.push_str(&format!("{:<6} {:>12} {:>12} {:>10}\n", "Run", "Seed", "Length", "Time"));
        report.push_str("-".repeat(44).as_str());
        report.push('\n');
        for result in &self.results {
            report.push_str(&format!(
                "{:<6} {:>12} {:>12.2} {:>10.4}\n",
                result.run, result.seed, result.fitness, result.time
            ));
        }
        report.push_str("-".repeat(44).as_str());
        report.push('\n');

        report.push_str(&format!(
            "Best {:.2}  Worst {:.2}  Mean {:.2}  Std {:.2}  Avg time {:.4}s\n",
            stats.best, stats.worst, stats.mean, stats.std_dev, stats.mean_time
        ));
        report.push_str(&format!("Best route: {}\n", stats.best_route));

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}
