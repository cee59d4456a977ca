//! Simulation policies for the MCTS algorithm
//!
//! A simulation policy plays a game out from a freshly expanded node and
//! hands the final state to backpropagation.

use rand::RngCore;

use crate::game_state::GameState;

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Plays out from `state` and returns the state the playout ended in
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> S;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Plays uniformly random legal moves until the game ends
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy {
    /// Stop after this many actions even if the game is not over
    pub max_length: Option<usize>,
}

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy { max_length: None }
    }

    /// A random policy that gives up after `max_length` actions
    pub fn with_max_length(max_length: usize) -> Self {
        RandomPolicy {
            max_length: Some(max_length),
        }
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> S {
        state.simulate_random_playout(self.max_length, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> S {
        (**self).simulate(state, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
