//! TSP Genetic Solver Library
//!
//! Approximates the shortest path through every city of a road network
//! with a classic generational genetic algorithm.
//!
//! # Features
//!
//! - Parser for `<cities>,<roads>` instance files
//! - Dense distance matrix with connectivity tracking
//! - Roulette wheel (or tournament) selection, ordered crossover, swap mutation
//! - Single-elite generational loop, reproducible from a seed
//! - Repeated-run benchmarking with CSV export
//!
//! # Example
//!
//! ```no_run
//! use tsp_genetic::instance::TspInstance;
//! use tsp_genetic::genetic::{GaConfig, GeneticAlgorithm};
//!
//! let instance = TspInstance::from_file("dados.txt").unwrap();
//!
//! let config = GaConfig { seed: Some(42), ..Default::default() };
//! let mut ga = GeneticAlgorithm::from_instance(&instance, config).unwrap();
//! let solution = ga.run().unwrap();
//!
//! println!("{}", solution.route);
//! ```

pub mod error;
pub mod instance;
pub mod solution;
pub mod genetic;
pub mod benchmark;

pub use error::{Result, TspError};
pub use instance::{DistanceMatrix, Edge, TspInstance};
pub use solution::Solution;
