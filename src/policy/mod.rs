//! Policies for the phases of the MCTS algorithm
//!
//! - Selection policies: how to descend through fully expanded nodes
//! - Simulation policies: how to play out a game from a new node
//! - Backpropagation policies: how to credit a rollout to the nodes on its path

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};
