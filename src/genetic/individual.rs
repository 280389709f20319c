//! Candidate tours.

use serde::{Deserialize, Serialize};

use crate::instance::DistanceMatrix;

/// Individual in the genetic algorithm population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Visiting order of every city id in `1..=n`, each exactly once
    pub chromosome: Vec<usize>,
    /// Path length of the chromosome (lower is better, 0 until evaluated)
    pub fitness: f64,
}

impl Individual {
    pub fn new(chromosome: Vec<usize>) -> Self {
        Individual { chromosome, fitness: 0.0 }
    }

    /// Recompute the cached fitness as the open path length.
    ///
    /// The leg from the last city back to the first is not counted.
    pub fn compute_fitness(&mut self, matrix: &DistanceMatrix) -> f64 {
        self.fitness = self.chromosome
            .windows(2)
            .map(|leg| matrix.distance(leg[0], leg[1]))
            .sum();
        self.fitness
    }

    /// Number of consecutive city pairs that have no road between them
    pub fn missing_legs(&self, matrix: &DistanceMatrix) -> usize {
        self.chromosome
            .windows(2)
            .filter(|leg| !matrix.has_edge(leg[0], leg[1]))
            .count()
    }

    /// Whether the chromosome visits every city in `1..=num_cities` exactly once
    pub fn is_valid_permutation(&self, num_cities: usize) -> bool {
        if self.chromosome.len() != num_cities {
            return false;
        }

        let mut seen = vec![false; num_cities + 1];
        for &city in &self.chromosome {
            if city == 0 || city > num_cities || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// Human-readable route, e.g. `3-1-4-2`
    pub fn route(&self) -> String {
        self.chromosome
            .iter()
            .map(|city| city.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Edge;

    fn square() -> DistanceMatrix {
        let edges = vec![
            Edge::new(1, 2, 10.0),
            Edge::new(2, 3, 15.0),
            Edge::new(3, 4, 20.0),
            Edge::new(4, 1, 25.0),
            Edge::new(1, 3, 35.0),
            Edge::new(2, 4, 30.0),
        ];
        DistanceMatrix::from_edges(&edges, 4).unwrap()
    }

    #[test]
    fn test_new_individual_is_unevaluated() {
        let ind = Individual::new(vec![3, 1, 4, 2]);
        assert_eq!(ind.fitness, 0.0);
        assert_eq!(ind.len(), 4);
    }

    #[test]
    fn test_fitness_is_open_path_length() {
        let matrix = square();
        let mut ind = Individual::new(vec![1, 2, 3, 4]);

        // 10 + 15 + 20, the closing 4 -> 1 leg (25) is excluded
        assert_eq!(ind.compute_fitness(&matrix), 45.0);
        assert_eq!(ind.fitness, 45.0);
    }

    #[test]
    fn test_fitness_is_deterministic() {
        let matrix = square();
        let mut ind = Individual::new(vec![2, 4, 1, 3]);

        let first = ind.compute_fitness(&matrix);
        for _ in 0..10 {
            assert_eq!(ind.compute_fitness(&matrix), first);
        }
        assert_eq!(first, 30.0 + 25.0 + 35.0);
    }

    #[test]
    fn test_single_city_has_zero_fitness() {
        let matrix = DistanceMatrix::from_edges(&[], 1).unwrap();
        let mut ind = Individual::new(vec![1]);
        assert_eq!(ind.compute_fitness(&matrix), 0.0);
    }

    #[test]
    fn test_permutation_validity() {
        assert!(Individual::new(vec![3, 1, 4, 2]).is_valid_permutation(4));
        assert!(!Individual::new(vec![3, 1, 3, 2]).is_valid_permutation(4));
        assert!(!Individual::new(vec![3, 1, 2]).is_valid_permutation(4));
        assert!(!Individual::new(vec![0, 1, 2, 3]).is_valid_permutation(4));
        assert!(!Individual::new(vec![5, 1, 2, 3]).is_valid_permutation(4));
    }

    #[test]
    fn test_route_formatting() {
        assert_eq!(Individual::new(vec![3, 1, 4, 2]).route(), "3-1-4-2");
        assert_eq!(Individual::new(vec![7]).route(), "7");
    }

    #[test]
    fn test_missing_legs() {
        let matrix = DistanceMatrix::from_edges(&[Edge::new(1, 2, 4.0)], 3).unwrap();
        let ind = Individual::new(vec![1, 2, 3]);
        assert_eq!(ind.missing_legs(&matrix), 1);
    }
}
