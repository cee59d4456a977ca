//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a rollout.

use crate::{game_state::GameState, tree::MCTSNode};

/// Trait for policies that backpropagate rollout results
pub trait BackpropagationPolicy<S: GameState>: Send + Sync {
    /// Credits `node` with the rollout that ended in `final_state`
    fn update_stats(&self, node: &mut MCTSNode<S>, final_state: &S);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;
}

/// Standard backpropagation policy
///
/// Increments the visit count and adds the final state's result as seen by
/// the player who moved into the node.
#[derive(Debug, Clone, Default)]
pub struct StandardPolicy;

impl StandardPolicy {
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, final_state: &S) {
        node.increment_visits();
        node.add_reward(final_state.get_result(&node.player));
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut MCTSNode<S>, final_state: &S) {
        (**self).update_stats(node, final_state)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }
}
