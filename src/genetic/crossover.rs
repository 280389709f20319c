//! Ordered crossover (segment copy + fill).

use rand::prelude::*;

use super::individual::Individual;

/// Combine two parents into one child with a random cut.
///
/// The cut `[start, end)` is drawn with `start` in `[0, n)` and `end` in
/// `(start, n]`, so the copied segment is never empty.
pub fn ordered_crossover<R: Rng + ?Sized>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> Individual {
    let n = parent1.len();
    if n == 0 {
        return Individual::new(Vec::new());
    }

    let start = rng.gen_range(0..n);
    let end = rng.gen_range(start + 1..=n);
    ordered_crossover_with_cut(parent1, parent2, start, end)
}

/// Ordered crossover with an explicit cut.
///
/// Positions `start..end` come from `parent1` unchanged; every other slot is
/// filled left to right with `parent2`'s genes in `parent2` order, skipping
/// genes already copied. Out-of-range cuts are clamped to the chromosome.
pub fn ordered_crossover_with_cut(
    parent1: &Individual,
    parent2: &Individual,
    start: usize,
    end: usize,
) -> Individual {
    let p1 = &parent1.chromosome;
    let p2 = &parent2.chromosome;
    let n = p1.len();
    let end = end.min(n);
    let start = start.min(end);

    let max_city = p1.iter().chain(p2.iter()).copied().max().unwrap_or(0);
    let mut copied = vec![false; max_city + 1];
    let mut child: Vec<Option<usize>> = vec![None; n];

    for i in start..end {
        child[i] = Some(p1[i]);
        copied[p1[i]] = true;
    }

    let mut donors = p2.iter().copied().filter(|&city| !copied[city]);
    let chromosome = child
        .into_iter()
        .filter_map(|slot| slot.or_else(|| donors.next()))
        .collect();

    Individual::new(chromosome)
}
