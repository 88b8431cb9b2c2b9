//! Winner selection. A draw is a partial Fisher-Yates shuffle: pick a uniform
//! index over the remaining candidates, remove it, repeat.

use std::collections::HashSet;

use rand::Rng;

use crate::models::{Contestant, Winner};

/// Names of everyone already recorded as a winner.
pub fn winner_names(winners: &[Winner]) -> HashSet<String> {
    winners.iter().map(|winner| winner.name.clone()).collect()
}

/// Contestants from `pool` that have not won yet, in pool order.
pub fn eligible_pool(pool: &[Contestant], already_won: &HashSet<String>) -> Vec<Contestant> {
    pool.iter()
        .filter(|contestant| !already_won.contains(&contestant.name))
        .cloned()
        .collect()
}

/// Draw up to `count` distinct contestants from `pool`, skipping anyone named
/// in `already_won`, using the thread-local generator.
pub fn draw(pool: &[Contestant], count: usize, already_won: &HashSet<String>) -> Vec<Contestant> {
    draw_with_rng(pool, count, already_won, &mut rand::thread_rng())
}

/// Same as [`draw`] with a caller-supplied generator.
///
/// When the eligible set is no larger than `count` every eligible contestant
/// is returned in pool order. A `count` of zero yields nothing.
pub fn draw_with_rng<R: Rng + ?Sized>(
    pool: &[Contestant],
    count: usize,
    already_won: &HashSet<String>,
    rng: &mut R,
) -> Vec<Contestant> {
    let mut candidates = eligible_pool(pool, already_won);
    if candidates.len() <= count {
        return candidates;
    }

    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.gen_range(0..candidates.len());
        picked.push(candidates.swap_remove(index));
    }
    picked
}
