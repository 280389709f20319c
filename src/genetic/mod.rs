//! Genetic algorithm for the TSP.
//!
//! The pieces are kept in separate modules so they can be tested and reused
//! on their own:
//! - `individual`: a tour and its cached path length
//! - `population`: random initialization and fitness evaluation
//! - `selection`: roulette wheel and tournament parent selection
//! - `crossover`: ordered (segment copy + fill) crossover
//! - `mutation`: low-probability swap mutation
//! - `algorithm`: the generational loop with single-elite carry-over

pub mod individual;
pub mod population;
pub mod selection;
pub mod crossover;
pub mod mutation;
pub mod config;
pub mod algorithm;

pub use individual::*;
pub use population::*;
pub use selection::*;
pub use crossover::*;
pub use mutation::*;
pub use config::*;
pub use algorithm::*;
