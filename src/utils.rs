//! Numeric helpers shared by the selection policy and the final move choice

use rand::Rng;

/// Calculates the exploration term `C * sqrt(2 ln N / n)`
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * (2.0 * (parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCB1 value of a child
///
/// Unvisited children score infinity so they are always tried first.
pub fn ucb1_value(
    total_reward: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    total_reward / visits as f64 + exploration_term(parent_visits, visits, exploration_constant)
}

/// Index of the highest score, ties broken uniformly at random
///
/// Returns `None` for an empty iterator.
pub fn argmax_random_tie<I, R>(scores: I, rng: &mut R) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
    R: Rng + ?Sized,
{
    let mut best_value = f64::NEG_INFINITY;
    let mut best: Vec<usize> = Vec::new();

    for (i, value) in scores.into_iter().enumerate() {
        if best.is_empty() || value > best_value {
            best_value = value;
            best.clear();
            best.push(i);
        } else if value == best_value {
            best.push(i);
        }
    }

    match best.len() {
        0 => None,
        1 => Some(best[0]),
        n => Some(best[rng.gen_range(0..n)]),
    }
}
