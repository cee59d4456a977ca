//! Referee for a match between two agents
//!
//! [`MatchRunner`] owns the true [`Match`]. Each half-move it asks the active
//! agent for a move, applies it to the engine, and reports the outcome to both
//! agents, each with the type of the piece it faced.

use log::{debug, info};

use crate::{
    belief::MoveReport,
    board::{resolve_challenge, Color, Move, Outcome},
    engine::Match,
    opponent::Opponent,
    Error, Result,
};

/// Drives a match between a Blue and a Red agent
pub struct MatchRunner {
    blue: Box<dyn Opponent>,
    red: Box<dyn Opponent>,
    game: Match,
    half_moves: usize,
}

impl MatchRunner {
    pub fn new(blue: Box<dyn Opponent>, red: Box<dyn Opponent>) -> Self {
        MatchRunner {
            blue,
            red,
            game: Match::new(),
            half_moves: 0,
        }
    }

    /// The authoritative match
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Half-moves played so far
    pub fn half_moves(&self) -> usize {
        self.half_moves
    }

    pub fn agent(&self, color: Color) -> &dyn Opponent {
        match color {
            Color::Blue => self.blue.as_ref(),
            Color::Red => self.red.as_ref(),
        }
    }

    fn agent_mut(&mut self, color: Color) -> &mut dyn Opponent {
        match color {
            Color::Blue => self.blue.as_mut(),
            Color::Red => self.red.as_mut(),
        }
    }

    /// Asks both agents for a layout and sets up the board, Blue first
    pub fn setup(&mut self) -> Result<()> {
        for color in Color::ALL {
            let agent = self.agent_mut(color);
            let layout = agent.board_layout();
            agent.init_board_layout(color, &layout)?;
            self.game.set_board(&layout, color)?;
            debug!("{color} set up {layout:?}");
        }
        Ok(())
    }

    /// Plays one half-move for the active color
    ///
    /// Returns the move played, or `None` when the agent had no move.
    pub fn step(&mut self) -> Result<Option<Move>> {
        if self.game.is_game_over() {
            return Err(Error::MatchOver);
        }
        let color = self.game.active_color();
        let Some(mv) = self.agent_mut(color).next_move()? else {
            debug!("{color} has no move to play");
            return Ok(None);
        };

        let attacker = self.game.piece_at(mv.from).map(|piece| piece.kind);
        let defender = self.game.piece_at(mv.to).map(|piece| piece.kind);
        self.game.make_move(mv.from, mv.to, color)?;
        self.half_moves += 1;

        let outcome = match (attacker, defender) {
            (Some(attacker), Some(defender)) => resolve_challenge(attacker, defender),
            _ => Outcome::Move,
        };
        let (mover_sees, other_sees) = match outcome {
            Outcome::Move => (None, None),
            _ => (defender, attacker),
        };

        self.agent_mut(color)
            .apply_move(&MoveReport::new(mv.from, mv.to, outcome, mover_sees))?;
        self.agent_mut(color.opponent())
            .apply_move(&MoveReport::new(mv.from, mv.to, outcome, other_sees))?;

        Ok(Some(mv))
    }

    /// Plays until the match ends, an agent has no move, or `max_half_moves`
    /// half-moves have been played; returns the winner, if any
    pub fn play(&mut self, max_half_moves: usize) -> Result<Option<Color>> {
        while !self.game.is_game_over() && self.half_moves < max_half_moves {
            if self.step()?.is_none() {
                break;
            }
        }

        match self.game.winner() {
            Some(winner) => info!(
                "{winner} ({}) won after {} half-moves",
                self.agent(winner).name(),
                self.half_moves
            ),
            None => info!("no winner after {} half-moves", self.half_moves),
        }
        Ok(self.game.winner())
    }
}
