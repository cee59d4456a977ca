//! The authoritative match state machine
//!
//! [`Match`] owns the true board. It validates setups and moves, resolves
//! challenges and detects the end of the match. Searchers never look at it
//! directly except through the fully-observable [`GameState`] proxy.

use log::{debug, info};

use crate::{
    board::{is_valid_layout, resolve_challenge, Color, Move, Outcome, Piece, PieceType},
    game_state::GameState,
    topology::{adjacent, is_adjacent, is_valid, Cell, CELL_COUNT, CENTER},
    Error, Result,
};

/// Bonus added to (or subtracted from) a move's score when it ends the match
pub const TERMINAL_BONUS: i32 = 100;

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingBlueSetup,
    AwaitingRedSetup,
    InProgress,
    GameOver,
}

/// An entry in the match's move log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggedMove {
    Setup { color: Color, pieces: Vec<PieceType> },
    Move { color: Color, mv: Move },
}

/// The authoritative state of one match
#[derive(Debug, Clone)]
pub struct Match {
    board: [Option<Piece>; CELL_COUNT],
    /// Per-color round counter; -1 until that color has set up
    rounds: [i32; 2],
    moves: Vec<LoggedMove>,
    game_over: bool,
    winner: Option<Color>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Creates an empty match awaiting both setups
    pub fn new() -> Self {
        Match {
            board: [None; CELL_COUNT],
            rounds: [-1, -1],
            moves: Vec::new(),
            game_over: false,
            winner: None,
        }
    }

    /// Snapshot of every cell
    pub fn board(&self) -> &[Option<Piece>; CELL_COUNT] {
        &self.board
    }

    /// The piece on `cell`, if any
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board.get(cell).copied().flatten()
    }

    /// Setups and moves applied so far, in order
    pub fn moves(&self) -> &[LoggedMove] {
        &self.moves
    }

    /// Round counter of `color` (-1 before setup)
    pub fn round(&self, color: Color) -> i32 {
        self.rounds[color.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winning color once the match is over
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn phase(&self) -> MatchPhase {
        if self.game_over {
            MatchPhase::GameOver
        } else if self.round(Color::Blue) < 0 {
            MatchPhase::AwaitingBlueSetup
        } else if self.round(Color::Red) < 0 {
            MatchPhase::AwaitingRedSetup
        } else {
            MatchPhase::InProgress
        }
    }

    /// The color to act next: the one with the lower round, Blue on ties
    pub fn active_color(&self) -> Color {
        if self.round(Color::Blue) <= self.round(Color::Red) {
            Color::Blue
        } else {
            Color::Red
        }
    }

    /// Number of pieces `color` still has on the board
    pub fn piece_count(&self, color: Color) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|piece| piece.color == color)
            .count()
    }

    /// Number of pieces of `kind` that `color` still has on the board
    pub fn type_count(&self, color: Color, kind: PieceType) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|piece| piece.color == color && piece.kind == kind)
            .count()
    }

    /// Places a color's nine pieces on its home cells
    ///
    /// `pieces` must contain exactly three of each type, and each color may
    /// set up only once.
    pub fn set_board(&mut self, pieces: &[PieceType], color: Color) -> Result<()> {
        if self.game_over {
            return Err(Error::MatchOver);
        }
        if self.round(color) >= 0 {
            return Err(Error::Setup(format!("{color} has already set up")));
        }
        if !is_valid_layout(pieces) {
            return Err(Error::Setup(format!(
                "{color} layout must hold three of each type, got {pieces:?}"
            )));
        }

        for (cell, &kind) in color.home_cells().zip(pieces) {
            self.board[cell] = Some(Piece::new(kind, color));
        }
        self.rounds[color.index()] += 1;
        self.moves.push(LoggedMove::Setup {
            color,
            pieces: pieces.to_vec(),
        });
        debug!("{color} set up {pieces:?}");
        Ok(())
    }

    /// Applies a move for `color`
    ///
    /// Returns the signed score of the move for the mover (0 for a movement or
    /// tie, +1 for a win, -1 for a loss, shifted by ±100 when the move ends
    /// the match) together with the type that stood on `to` beforehand.
    pub fn make_move(
        &mut self,
        from: Cell,
        to: Cell,
        color: Color,
    ) -> Result<(i32, Option<PieceType>)> {
        if self.game_over {
            return Err(Error::MatchOver);
        }
        if self.round(Color::Blue) < 0 || self.round(Color::Red) < 0 {
            return Err(Error::IllegalMove("both colors must set up first".into()));
        }
        if self.active_color() != color {
            return Err(Error::IllegalMove(format!("it is not {color}'s turn")));
        }
        if !is_valid(from) || !is_adjacent(from, to) {
            return Err(Error::IllegalMove(format!(
                "{to} is not adjacent to {from}"
            )));
        }
        let mover = match self.board[from] {
            Some(piece) if piece.color == color => piece,
            Some(_) => {
                return Err(Error::IllegalMove(format!(
                    "the piece on {from} does not belong to {color}"
                )))
            }
            None => return Err(Error::IllegalMove(format!("no piece on {from}"))),
        };

        let (mut score, defender) = match self.board[to] {
            None => {
                self.board[to] = Some(mover);
                self.board[from] = None;
                (0, None)
            }
            Some(target) if target.color == color => {
                return Err(Error::IllegalMove(format!(
                    "{color} cannot move onto its own piece on {to}"
                )))
            }
            Some(mut target) => {
                let mut mover = mover;
                mover.revealed = true;
                target.revealed = true;
                let outcome = resolve_challenge(mover.kind, target.kind);
                match outcome {
                    Outcome::Win => {
                        self.board[to] = Some(mover);
                        self.board[from] = None;
                    }
                    Outcome::Loss => {
                        self.board[to] = Some(target);
                        self.board[from] = None;
                    }
                    Outcome::Tie | Outcome::Move => {
                        self.board[to] = Some(target);
                        self.board[from] = Some(mover);
                    }
                }
                (outcome.score(), Some(target.kind))
            }
        };

        self.rounds[color.index()] += 1;
        self.moves.push(LoggedMove::Move {
            color,
            mv: Move::new(from, to),
        });

        if let Some(winner) = self.terminal_winner(color) {
            self.game_over = true;
            self.winner = Some(winner);
            score += if winner == color {
                TERMINAL_BONUS
            } else {
                -TERMINAL_BONUS
            };
            info!("match over after {color} {from}:{to}, {winner} wins");
        }
        debug!("{color} {from}:{to} scored {score}");

        Ok((score, defender))
    }

    /// Evaluates the end-of-match rules after `mover` has moved
    fn terminal_winner(&self, mover: Color) -> Option<Color> {
        let opponent = mover.opponent();
        if self.piece_count(opponent) == 0 {
            return Some(mover);
        }
        if self.piece_count(mover) == 0 {
            return Some(opponent);
        }
        let center = self.board[CENTER]?;
        if self.type_count(center.color.opponent(), center.kind.counter()) == 0 {
            return Some(center.color);
        }
        None
    }

    /// Every move available to `color`, ordered by source cell and then by
    /// adjacency order
    pub fn moves_for(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.board.iter().enumerate() {
            if !matches!(piece, Some(p) if p.color == color) {
                continue;
            }
            for to in adjacent(from) {
                if !matches!(self.board[to], Some(p) if p.color == color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// The color to act and its legal moves; empty unless the match is in
    /// progress
    pub fn get_possible_moves(&self) -> (Color, Vec<Move>) {
        let color = self.active_color();
        if self.phase() != MatchPhase::InProgress {
            return (color, Vec::new());
        }
        (color, self.moves_for(color))
    }
}

impl GameState for Match {
    type Action = Move;
    type Player = Color;

    fn get_legal_actions(&self) -> Vec<Move> {
        self.get_possible_moves().1
    }

    fn apply_action(&self, action: &Move) -> Self {
        let mut next = self.clone();
        let color = self.active_color();
        if let Err(err) = next.make_move(action.from, action.to, color) {
            panic!("legal action {action} rejected for {color}: {err}");
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.game_over
    }

    fn get_result(&self, for_player: &Color) -> f64 {
        match self.winner {
            Some(winner) if winner == *for_player => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }

    fn get_current_player(&self) -> Color {
        self.active_color()
    }
}
