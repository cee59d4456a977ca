//! Traits defining the state abstraction searched by MCTS.
//!
//! Any fully-observable, turn-based state can be searched once it can list
//! its legal actions, produce successor states, and report a result at the
//! end. The match engine implements this trait directly.

use std::fmt::Debug;

use rand::seq::SliceRandom;
use rand::Rng;

/// Trait for actions that can be taken in a game
///
/// Children in the search tree are keyed by the action that produced them,
/// so actions must be comparable.
pub trait Action: Clone + Debug + PartialEq {}

impl<T: Clone + Debug + PartialEq> Action for T {}

/// Trait for players in a game
pub trait Player: Clone + Debug + PartialEq {}

impl<T: Clone + Debug + PartialEq> Player for T {}

/// Trait defining the game state interface required for MCTS
pub trait GameState: Clone {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the legal actions from this state, in a deterministic order
    ///
    /// Terminal states return an empty list.
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action to a copy of the current state
    ///
    /// The original must be left untouched: the search explores siblings from
    /// the same state.
    fn apply_action(&self, action: &Self::Action) -> Self;

    /// Returns true if this state is terminal (game over)
    fn is_terminal(&self) -> bool;

    /// Returns the result from the perspective of `for_player`
    ///
    /// 1.0 is a win, 0.0 a loss, 0.5 a draw or an unfinished game.
    fn get_result(&self, for_player: &Self::Player) -> f64;

    /// Returns the player whose turn it is in this state
    fn get_current_player(&self) -> Self::Player;

    /// Plays uniformly random legal actions until a terminal state, or until
    /// `max_length` actions have been played, and returns the final state.
    ///
    /// # Panics
    ///
    /// Panics if a non-terminal state has no legal actions; that means the
    /// state's terminal detection is broken.
    fn simulate_random_playout<R: Rng + ?Sized>(&self, max_length: Option<usize>, rng: &mut R) -> Self {
        let mut current_state = self.clone();
        let mut played = 0;

        while !current_state.is_terminal() {
            if max_length.is_some_and(|limit| played >= limit) {
                break;
            }
            let legal_actions = current_state.get_legal_actions();
            let Some(action) = legal_actions.choose(rng) else {
                panic!("non-terminal state has no legal actions");
            };
            current_state = current_state.apply_action(action);
            played += 1;
        }

        current_state
    }
}
