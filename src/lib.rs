//! # rps3-ai
//!
//! Game-playing agents for a hidden-information rock-paper-scissors board
//! game played on a ring board.
//!
//! Two players, Blue and Red, each place nine pieces (three Rocks, three
//! Papers, three Scissors) on their half of an outer ring of eighteen cells.
//! An inner ring of nine cells and a single center cell complete the board.
//! Pieces move one step at a time; moving onto an enemy piece starts a
//! challenge settled by the usual rock-paper-scissors rule. Pieces start
//! hidden and are revealed by challenges.
//!
//! The crate provides:
//!
//! - The board topology and the authoritative match engine ([`Match`])
//! - A per-agent [`BeliefState`] tracking what that agent knows
//! - An expectimax-flavoured alpha-beta searcher over belief states
//!   ([`Minimax`]) with chance nodes for unknown pieces and a history table
//! - A generic UCT Monte Carlo Tree Search ([`MCTS`]) over any
//!   fully-observable [`GameState`], which the match engine implements
//! - Opponents and a [`MatchRunner`] that referees a game between two of them
//!
//! ## Basic Usage
//!
//! ```
//! use rps3_ai::{board::standard_layout, BeliefState, Color, Match, Minimax, MinimaxConfig};
//!
//! fn main() -> Result<(), rps3_ai::Error> {
//!     let layout = standard_layout();
//!
//!     let mut game = Match::new();
//!     game.set_board(&layout, Color::Blue)?;
//!     game.set_board(&layout, Color::Red)?;
//!
//!     // Blue's view of the match: its own pieces and nine unknown enemies
//!     let belief = BeliefState::init_board_layout(Color::Blue, &layout)?;
//!
//!     let mut searcher = Minimax::new(MinimaxConfig::default().with_max_depth(2))?;
//!     let mv = searcher.choose_move(&belief)?.expect("the opening has moves");
//!
//!     let (score, _) = game.make_move(mv.from, mv.to, Color::Blue)?;
//!     println!("Blue played {mv} scoring {score}");
//!     Ok(())
//! }
//! ```
//!
//! ## Searching the engine with MCTS
//!
//! ```
//! use rps3_ai::{board::standard_layout, Color, MCTSConfig, Match, MCTS};
//!
//! fn main() -> Result<(), rps3_ai::Error> {
//!     let mut game = Match::new();
//!     game.set_board(&standard_layout(), Color::Blue)?;
//!     game.set_board(&standard_layout(), Color::Red)?;
//!
//!     let config = MCTSConfig::default()
//!         .with_max_iterations(50)
//!         .with_max_playout_length(100);
//!     let mut mcts = MCTS::new(game, config)?.with_seed(7);
//!
//!     let best = mcts.search()?;
//!     println!("{best} ({})", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```

pub mod belief;
pub mod board;
pub mod config;
pub mod engine;
pub mod game_state;
pub mod harness;
pub mod mcts;
pub mod minimax;
pub mod opponent;
pub mod policy;
pub mod stats;
pub mod topology;
pub mod tree;
pub mod utils;

pub use belief::{BeliefState, MoveReport, Side, Square};
pub use board::{Color, Move, Outcome, Piece, PieceType};
pub use config::{MCTSConfig, MinimaxConfig};
pub use engine::{Match, MatchPhase};
pub use game_state::{Action, GameState, Player};
pub use harness::MatchRunner;
pub use mcts::MCTS;
pub use minimax::Minimax;
pub use opponent::{MinimaxOpponent, Opponent, RandomOpponent};
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::{MinimaxStatistics, SearchStatistics};
pub use tree::{MCTSNode, NodePath};

/// Errors raised by the engine, the belief state and the searchers
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A board setup was rejected
    #[error("Invalid setup: {0}")]
    Setup(String),

    /// A move was rejected by the engine
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// The match has already ended
    #[error("The match is over")]
    MatchOver,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// A reported move does not fit the belief state it was applied to
    #[error("Inconsistent move report: {0}")]
    InconsistentReport(String),
}

/// Result type for this crate's operations
pub type Result<T> = std::result::Result<T, Error>;
