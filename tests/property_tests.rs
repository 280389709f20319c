//! Property-based tests for tsp-genetic
//!
//! Uses proptest to check that every operator keeps tours valid permutations.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tsp_genetic::genetic::{
    evaluate_population, initialize_population, ordered_crossover, ordered_crossover_with_cut,
    swap_mutation, GaConfig, GeneticAlgorithm, Individual,
};
use tsp_genetic::instance::{DistanceMatrix, Edge};

fn shuffled(n: usize, seed: u64) -> Individual {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    initialize_population(1, n, &mut rng).remove(0)
}

fn complete_graph(n: usize, weights: &[f64]) -> DistanceMatrix {
    let mut edges = Vec::new();
    let mut k = 0;
    for a in 1..=n {
        for b in a + 1..=n {
            edges.push(Edge::new(a, b, 1.0 + weights[k % weights.len()]));
            k += 1;
        }
    }
    DistanceMatrix::from_edges(&edges, n).unwrap()
}

proptest! {
    #[test]
    fn initial_population_is_valid(n in 2usize..40, size in 1usize..30, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = initialize_population(size, n, &mut rng);

        prop_assert_eq!(population.len(), size);
        for ind in &population {
            prop_assert!(ind.is_valid_permutation(n));
        }
    }

    #[test]
    fn crossover_child_is_valid_for_any_cut(
        n in 2usize..30,
        seed1 in any::<u64>(),
        seed2 in any::<u64>(),
        a in 0usize..30,
        b in 0usize..31,
    ) {
        let p1 = shuffled(n, seed1);
        let p2 = shuffled(n, seed2);
        let start = a.min(b) % n;
        let end = (a.max(b) % (n + 1)).max(start);

        let child = ordered_crossover_with_cut(&p1, &p2, start, end);

        prop_assert!(child.is_valid_permutation(n));
        prop_assert_eq!(&child.chromosome[start..end], &p1.chromosome[start..end]);
    }

    #[test]
    fn random_crossover_and_mutation_keep_permutation(
        n in 2usize..30,
        seed in any::<u64>(),
        rounds in 1usize..20,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut current = shuffled(n, seed.wrapping_add(1));

        for _ in 0..rounds {
            let other = shuffled(n, rng.gen::<u64>());
            current = ordered_crossover(&current, &other, &mut rng);
            swap_mutation(&mut current, 0.5, &mut rng);
            prop_assert!(current.is_valid_permutation(n));
        }
    }

    #[test]
    fn matrix_is_symmetric(
        n in 2usize..15,
        raw in prop::collection::vec((1usize..15, 1usize..15, 0.0f64..500.0), 0..60),
    ) {
        let edges: Vec<Edge> = raw
            .into_iter()
            .filter(|(a, b, _)| *a <= n && *b <= n)
            .map(|(a, b, d)| Edge::new(a, b, d))
            .collect();
        let matrix = DistanceMatrix::from_edges(&edges, n).unwrap();

        for edge in &edges {
            prop_assert_eq!(
                matrix.distance(edge.city_a, edge.city_b),
                matrix.distance(edge.city_b, edge.city_a)
            );
        }
        prop_assert!(matrix.is_symmetric());
    }

    #[test]
    fn fitness_is_reversal_invariant(
        n in 2usize..20,
        weights in prop::collection::vec(0.0f64..100.0, 1..50),
        seed in any::<u64>(),
    ) {
        let matrix = complete_graph(n, &weights);
        let mut forward = shuffled(n, seed);
        let mut backward = Individual::new(forward.chromosome.iter().rev().copied().collect());

        let f = forward.compute_fitness(&matrix);
        let b = backward.compute_fitness(&matrix);
        prop_assert!((f - b).abs() < 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn best_fitness_never_regresses(
        n in 3usize..12,
        weights in prop::collection::vec(0.0f64..100.0, 1..30),
        seed in any::<u64>(),
    ) {
        let matrix = complete_graph(n, &weights);
        let config = GaConfig {
            population_size: 12,
            generations: 25,
            seed: Some(seed),
            ..Default::default()
        };

        let mut ga = GeneticAlgorithm::new(matrix.clone(), config).unwrap();
        let mut initial = ga.population().to_vec();
        evaluate_population(&mut initial, &matrix);

        let solution = ga.run().unwrap();

        for pair in solution.history.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        for ind in &initial {
            prop_assert!(solution.fitness() <= ind.fitness);
        }
    }
}
