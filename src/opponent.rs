//! Agents that play one side of a match
//!
//! An agent only ever sees its own [`BeliefState`]. The harness tells it the
//! outcome of every half-move through [`Opponent::apply_move`] and asks it
//! for its next move with [`Opponent::next_move`].

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    belief::{BeliefState, MoveReport, Side},
    board::{standard_layout, Color, Move, PieceType, PIECES_PER_SIDE},
    config::MinimaxConfig,
    minimax::Minimax,
    Result,
};

/// Three pieces of each type in random order
pub fn shuffled_layout<R: Rng + ?Sized>(rng: &mut R) -> [PieceType; PIECES_PER_SIDE] {
    let mut layout = standard_layout();
    layout.shuffle(rng);
    layout
}

/// A player agent driven by a harness
pub trait Opponent {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// The agent's current view of the match
    fn belief(&self) -> &BeliefState;

    fn belief_mut(&mut self) -> &mut BeliefState;

    /// Proposes a layout for this agent's home cells
    fn board_layout(&mut self) -> [PieceType; PIECES_PER_SIDE];

    /// Picks the next move, or `None` when the agent has nothing to play
    fn next_move(&mut self) -> Result<Option<Move>>;

    /// Resets the belief state for a new match played as `side`
    fn init_board_layout(&mut self, side: Color, layout: &[PieceType]) -> Result<()> {
        *self.belief_mut() = BeliefState::init_board_layout(side, layout)?;
        Ok(())
    }

    /// Records the outcome of a half-move played by either side
    fn apply_move(&mut self, report: &MoveReport) -> Result<()> {
        self.belief_mut().apply_report(report)
    }
}

/// Plays a uniformly random legal move
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    belief: BeliefState,
    rng: StdRng,
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomOpponent {
    pub fn new() -> Self {
        RandomOpponent {
            belief: BeliefState::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A random agent whose layouts and moves are reproducible
    pub fn with_seed(seed: u64) -> Self {
        RandomOpponent {
            belief: BeliefState::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn name(&self) -> &str {
        "random"
    }

    fn belief(&self) -> &BeliefState {
        &self.belief
    }

    fn belief_mut(&mut self) -> &mut BeliefState {
        &mut self.belief
    }

    fn board_layout(&mut self) -> [PieceType; PIECES_PER_SIDE] {
        shuffled_layout(&mut self.rng)
    }

    fn next_move(&mut self) -> Result<Option<Move>> {
        let moves = self.belief.possible_moves(Side::Player);
        Ok(moves.choose(&mut self.rng).copied())
    }
}

/// Chooses moves with the alpha-beta searcher
#[derive(Debug, Clone)]
pub struct MinimaxOpponent {
    belief: BeliefState,
    searcher: Minimax,
    rng: StdRng,
}

impl MinimaxOpponent {
    pub fn new(config: MinimaxConfig) -> Result<Self> {
        Ok(MinimaxOpponent {
            belief: BeliefState::new(),
            searcher: Minimax::new(config)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// Makes the layout shuffle reproducible; the search itself is
    /// deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn searcher(&self) -> &Minimax {
        &self.searcher
    }
}

impl Opponent for MinimaxOpponent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn belief(&self) -> &BeliefState {
        &self.belief
    }

    fn belief_mut(&mut self) -> &mut BeliefState {
        &mut self.belief
    }

    fn board_layout(&mut self) -> [PieceType; PIECES_PER_SIDE] {
        shuffled_layout(&mut self.rng)
    }

    fn next_move(&mut self) -> Result<Option<Move>> {
        let chosen = self.searcher.choose_move(&self.belief)?;
        debug!("{}", self.searcher.get_statistics().summary());
        Ok(chosen)
    }
}
