//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to descend into during the
//! selection phase, balancing exploration and exploitation.

use rand::RngCore;

use crate::{game_state::GameState, tree::MCTSNode, utils};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Selects a child index of `node`, which must have children
    fn select_child(&self, node: &MCTSNode<S>, rng: &mut dyn RngCore) -> usize;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// ```text
/// UCB1 = average_reward + C * sqrt(2 * ln(parent_visits) / child_visits)
/// ```
///
/// Children with equal scores are chosen between uniformly at random.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Higher values favor exploration of less-visited nodes
    pub exploration_constant: f64,
}

impl UCB1Policy {
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// Calculates the UCB1 value for a child
    pub fn ucb1_value(&self, child_total: f64, child_visits: u64, parent_visits: u64) -> f64 {
        utils::ucb1_value(
            child_total,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::FRAC_1_SQRT_2)
    }
}

impl<S: GameState> SelectionPolicy<S> for UCB1Policy {
    fn select_child(&self, node: &MCTSNode<S>, rng: &mut dyn RngCore) -> usize {
        let parent_visits = node.visits();
        let scores = node.children.iter().map(|child| {
            self.ucb1_value(child.total_reward(), child.visits(), parent_visits)
        });
        utils::argmax_random_tie(scores, rng).unwrap_or(0)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(&self, node: &MCTSNode<S>, rng: &mut dyn RngCore) -> usize {
        (**self).select_child(node, rng)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}
