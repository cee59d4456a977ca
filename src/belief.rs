//! One agent's partially-observed view of the match
//!
//! A [`BeliefState`] mirrors the board from one side's perspective. Own pieces
//! are always known; enemy pieces are known only once a challenge has
//! revealed them. It is never synchronised with the true board: every change
//! arrives through [`BeliefState::apply_move`] as a [`MoveReport`].

use std::fmt;

use crate::{
    board::{Color, Move, Outcome, PieceType, PIECES_PER_SIDE, PIECES_PER_TYPE},
    topology::{adjacent, locate, Cell, CELL_COUNT, CENTER},
    Error, Result,
};

/// Which side of the belief state a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The agent holding the belief state
    Player,
    /// The other side
    Opponent,
}

/// Symbolic content of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    /// One of our pieces; `revealed` once the other side has seen it
    Own { kind: PieceType, revealed: bool },
    /// An enemy piece, with its type once revealed
    Enemy(Option<PieceType>),
}

impl Square {
    pub fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::Own { .. } => Some(Side::Player),
            Square::Enemy(_) => Some(Side::Opponent),
        }
    }

    /// The piece type if it is known to this side
    pub fn known_type(self) -> Option<PieceType> {
        match self {
            Square::Empty => None,
            Square::Own { kind, .. } => Some(kind),
            Square::Enemy(kind) => kind,
        }
    }

    fn code(self) -> String {
        match self {
            Square::Empty => "0".to_string(),
            Square::Own {
                kind,
                revealed: false,
            } => format!("P{kind}"),
            Square::Own {
                kind,
                revealed: true,
            } => format!("P{kind}!"),
            Square::Enemy(Some(kind)) => format!("O{kind}"),
            Square::Enemy(None) => "OU".to_string(),
        }
    }
}

/// What one side learns about a half-move once it has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub from: Cell,
    pub to: Cell,
    /// Outcome from the mover's point of view
    pub outcome: Outcome,
    /// Type of the opponent's piece involved in a challenge, as revealed by it
    pub other_hand: Option<PieceType>,
}

impl MoveReport {
    pub fn new(from: Cell, to: Cell, outcome: Outcome, other_hand: Option<PieceType>) -> Self {
        MoveReport {
            from,
            to,
            outcome,
            other_hand,
        }
    }

    pub fn movement(from: Cell, to: Cell) -> Self {
        Self::new(from, to, Outcome::Move, None)
    }
}

/// Partially-observed board plus the counters the searchers reason over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeliefState {
    squares: [Square; CELL_COUNT],
    /// Enemy pieces this side has eliminated, per type
    captures: [u8; 3],
    /// Enemy pieces whose type is known, per type, captured ones included
    enemy_counts: [u8; 3],
    /// Enemy pieces still on the board whose type is unknown
    unknown_enemies: u8,
    /// Own pieces still on the board, per type
    own_counts: [u8; 3],
    /// Own pieces the opponent has seen, per type
    own_reveals: [u8; 3],
    turns: u32,
}

impl Default for BeliefState {
    fn default() -> Self {
        Self::from_squares([Square::Empty; CELL_COUNT], [0; 3])
    }
}

impl BeliefState {
    /// An empty board with no pieces on either side
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a belief state from a symbolic board and capture counts,
    /// deriving every other counter from them
    ///
    /// The board is taken as given. The type probabilities only form a
    /// distribution when all nine enemy pieces are accounted for, either on
    /// the board or in `captures`.
    pub fn from_squares(squares: [Square; CELL_COUNT], captures: [u8; 3]) -> Self {
        let mut state = BeliefState {
            squares,
            captures,
            enemy_counts: captures,
            unknown_enemies: 0,
            own_counts: [0; 3],
            own_reveals: [0; 3],
            turns: 0,
        };
        for square in squares {
            match square {
                Square::Empty => {}
                Square::Enemy(Some(kind)) => state.enemy_counts[kind.index()] += 1,
                Square::Enemy(None) => state.unknown_enemies += 1,
                Square::Own { kind, revealed } => {
                    state.own_counts[kind.index()] += 1;
                    if revealed {
                        state.own_reveals[kind.index()] += 1;
                    }
                }
            }
        }
        state
    }

    /// Belief state at the start of a match for the agent playing `side`
    ///
    /// The agent's own layout fills its home cells and the other color's home
    /// cells hold nine unknown enemy pieces.
    pub fn init_board_layout(side: Color, layout: &[PieceType]) -> Result<Self> {
        if !crate::board::is_valid_layout(layout) {
            return Err(Error::Setup(format!(
                "layout must hold three of each type, got {layout:?}"
            )));
        }
        let mut squares = [Square::Empty; CELL_COUNT];
        for cell in side.opponent().home_cells() {
            squares[cell] = Square::Enemy(None);
        }
        for (cell, &kind) in side.home_cells().zip(layout) {
            squares[cell] = Square::Own {
                kind,
                revealed: false,
            };
        }
        Ok(Self::from_squares(squares, [0; 3]))
    }

    pub fn square(&self, cell: Cell) -> Square {
        self.squares.get(cell).copied().unwrap_or(Square::Empty)
    }

    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    pub fn captures(&self) -> [u8; 3] {
        self.captures
    }

    pub fn enemy_counts(&self) -> [u8; 3] {
        self.enemy_counts
    }

    pub fn unknown_enemies(&self) -> u8 {
        self.unknown_enemies
    }

    pub fn own_counts(&self) -> [u8; 3] {
        self.own_counts
    }

    pub fn own_reveals(&self) -> [u8; 3] {
        self.own_reveals
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Enemy pieces still alive, per type
    fn enemy_alive(&self) -> [u8; 3] {
        let per_type = PIECES_PER_TYPE as u8;
        [
            per_type.saturating_sub(self.captures[0]),
            per_type.saturating_sub(self.captures[1]),
            per_type.saturating_sub(self.captures[2]),
        ]
    }

    /// Records a half-move reported by the harness
    ///
    /// A report that cannot be applied leaves the state untouched.
    pub fn apply_move(
        &mut self,
        from: Cell,
        to: Cell,
        outcome: Outcome,
        other_hand: Option<PieceType>,
    ) -> Result<()> {
        *self = self.after_move(from, to, outcome, other_hand)?;
        Ok(())
    }

    /// The state following a half-move; `self` is left as it is
    pub fn after_move(
        &self,
        from: Cell,
        to: Cell,
        outcome: Outcome,
        other_hand: Option<PieceType>,
    ) -> Result<BeliefState> {
        let mut next = self.clone();
        next.record_move(from, to, outcome, other_hand)?;
        Ok(next)
    }

    // Mutates in place and may stop halfway on an inconsistent report, so it
    // only ever runs on a scratch copy
    fn record_move(
        &mut self,
        from: Cell,
        to: Cell,
        outcome: Outcome,
        other_hand: Option<PieceType>,
    ) -> Result<()> {
        if from >= CELL_COUNT || to >= CELL_COUNT {
            return Err(Error::InconsistentReport(format!(
                "move {from}:{to} leaves the board"
            )));
        }
        let mover = self.squares[from];
        let target = self.squares[to];
        if mover == Square::Empty {
            return Err(Error::InconsistentReport(format!("no piece on {from}")));
        }
        self.turns += 1;

        match outcome {
            Outcome::Move => {
                self.squares[to] = mover;
                self.squares[from] = Square::Empty;
            }
            Outcome::Tie => {
                let (enemy_cell, own_cell) = match mover.side() {
                    Some(Side::Player) => (to, from),
                    _ => (from, to),
                };
                self.reveal_enemy(enemy_cell, other_hand)?;
                self.reveal_own(own_cell)?;
            }
            Outcome::Win => match mover {
                Square::Own { kind, revealed } => {
                    let taken = self.enemy_type(target, other_hand)?;
                    self.captures[taken.index()] += 1;
                    if target == Square::Enemy(None) {
                        self.learn_enemy(taken);
                    }
                    if !revealed {
                        self.own_reveals[kind.index()] += 1;
                    }
                    self.squares[to] = Square::Own {
                        kind,
                        revealed: true,
                    };
                    self.squares[from] = Square::Empty;
                }
                Square::Enemy(known) => {
                    let Square::Own { kind, revealed } = target else {
                        return Err(Error::InconsistentReport(format!(
                            "enemy win on {to} without an own piece there"
                        )));
                    };
                    self.own_counts[kind.index()] = self.own_counts[kind.index()].saturating_sub(1);
                    if !revealed {
                        self.own_reveals[kind.index()] += 1;
                    }
                    let winner = match known {
                        Some(kind) => kind,
                        None => {
                            let kind = Self::require_hand(other_hand, from)?;
                            self.learn_enemy(kind);
                            kind
                        }
                    };
                    self.squares[to] = Square::Enemy(Some(winner));
                    self.squares[from] = Square::Empty;
                }
                Square::Empty => unreachable!("empty mover rejected above"),
            },
            Outcome::Loss => match mover {
                Square::Own { kind, revealed } => {
                    self.own_counts[kind.index()] = self.own_counts[kind.index()].saturating_sub(1);
                    if !revealed {
                        self.own_reveals[kind.index()] += 1;
                    }
                    self.reveal_enemy(to, other_hand)?;
                    self.squares[from] = Square::Empty;
                }
                Square::Enemy(known) => {
                    let lost = self.enemy_type(mover, other_hand)?;
                    self.captures[lost.index()] += 1;
                    if known.is_none() {
                        self.learn_enemy(lost);
                    }
                    self.reveal_own(to)?;
                    self.squares[from] = Square::Empty;
                }
                Square::Empty => unreachable!("empty mover rejected above"),
            },
        }
        Ok(())
    }

    /// Applies a [`MoveReport`]
    pub fn apply_report(&mut self, report: &MoveReport) -> Result<()> {
        self.apply_move(report.from, report.to, report.outcome, report.other_hand)
    }

    fn require_hand(other_hand: Option<PieceType>, cell: Cell) -> Result<PieceType> {
        other_hand.ok_or_else(|| {
            Error::InconsistentReport(format!("unknown enemy on {cell} needs a revealed type"))
        })
    }

    /// Type of an enemy square, falling back to the reported hand
    fn enemy_type(&self, square: Square, other_hand: Option<PieceType>) -> Result<PieceType> {
        match square {
            Square::Enemy(_) => other_hand.or(square.known_type()).ok_or_else(|| {
                Error::InconsistentReport("challenge against an unknown enemy without its type".into())
            }),
            _ => Err(Error::InconsistentReport(format!(
                "expected an enemy piece, found {square:?}"
            ))),
        }
    }

    fn learn_enemy(&mut self, kind: PieceType) {
        self.enemy_counts[kind.index()] += 1;
        self.unknown_enemies = self.unknown_enemies.saturating_sub(1);
    }

    /// Marks the enemy piece on `cell` as known
    fn reveal_enemy(&mut self, cell: Cell, other_hand: Option<PieceType>) -> Result<()> {
        match self.squares[cell] {
            Square::Enemy(None) => {
                let kind = Self::require_hand(other_hand, cell)?;
                self.squares[cell] = Square::Enemy(Some(kind));
                self.learn_enemy(kind);
                Ok(())
            }
            Square::Enemy(Some(_)) => Ok(()),
            other => Err(Error::InconsistentReport(format!(
                "expected an enemy piece on {cell}, found {other:?}"
            ))),
        }
    }

    /// Marks our piece on `cell` as seen by the opponent
    fn reveal_own(&mut self, cell: Cell) -> Result<()> {
        match self.squares[cell] {
            Square::Own {
                kind,
                revealed: false,
            } => {
                self.own_reveals[kind.index()] += 1;
                self.squares[cell] = Square::Own {
                    kind,
                    revealed: true,
                };
                Ok(())
            }
            Square::Own { revealed: true, .. } => Ok(()),
            other => Err(Error::InconsistentReport(format!(
                "expected an own piece on {cell}, found {other:?}"
            ))),
        }
    }

    /// Destinations open to the piece on `cell`: every adjacent cell not
    /// holding a piece of the same side
    pub fn piece_moves(&self, cell: Cell) -> Vec<Move> {
        let Some(side) = self.square(cell).side() else {
            return Vec::new();
        };
        adjacent(cell)
            .into_iter()
            .filter(|&to| self.squares[to].side() != Some(side))
            .map(|to| Move::new(cell, to))
            .collect()
    }

    /// Every move available to `side`, by ascending source cell
    pub fn possible_moves(&self, side: Side) -> Vec<Move> {
        (0..CELL_COUNT)
            .filter(|&cell| self.squares[cell].side() == Some(side))
            .flat_map(|cell| self.piece_moves(cell))
            .collect()
    }

    /// Probability that an unknown enemy piece is a Rock, Paper or Scissors
    pub fn get_opponent_piece_probabilities(&self) -> [f64; 3] {
        if self.unknown_enemies == 0 {
            return [0.0; 3];
        }
        let unknown = f64::from(self.unknown_enemies);
        let per_type = PIECES_PER_TYPE as f64;
        [
            (per_type - f64::from(self.enemy_counts[0])) / unknown,
            (per_type - f64::from(self.enemy_counts[1])) / unknown,
            (per_type - f64::from(self.enemy_counts[2])) / unknown,
        ]
    }

    /// Probability that the match is already decided, and for whom
    ///
    /// Certain outcomes return 1.0. An unknown enemy piece on the center
    /// while we have lost every piece of some type returns the probability
    /// that it is a type we can no longer challenge.
    pub fn is_match_over(&self) -> (f64, Option<Side>) {
        let own_alive = self.own_counts;
        let enemy_alive = self.enemy_alive();

        if own_alive.iter().all(|&count| count == 0) {
            return (1.0, Some(Side::Opponent));
        }
        if enemy_alive.iter().all(|&count| count == 0) {
            return (1.0, Some(Side::Player));
        }

        match self.squares[CENTER] {
            Square::Own { kind, .. } if enemy_alive[kind.counter().index()] == 0 => {
                (1.0, Some(Side::Player))
            }
            Square::Enemy(Some(kind)) if own_alive[kind.counter().index()] == 0 => {
                (1.0, Some(Side::Opponent))
            }
            Square::Enemy(None) if own_alive.contains(&0) => {
                let probabilities = self.get_opponent_piece_probabilities();
                let defeat: f64 = PieceType::ALL
                    .iter()
                    .filter(|lost| own_alive[lost.index()] == 0)
                    .map(|lost| probabilities[lost.beats().index()])
                    .sum();
                (defeat, Some(Side::Opponent))
            }
            _ => (0.0, None),
        }
    }

    /// Canonical encoding of the symbolic board and capture counts
    ///
    /// Two belief states with the same board and captures hash identically
    /// whatever history produced them.
    pub fn get_hash(&self) -> String {
        let mut hash: String = self.squares.iter().map(|square| square.code()).collect();
        hash.push('-');
        for count in self.captures {
            hash.push_str(&count.to_string());
        }
        hash
    }

    /// Total enemy pieces accounted for: known types (captured included)
    /// plus unknown ones still on the board
    pub fn enemy_total(&self) -> u32 {
        self.enemy_counts.iter().map(|&c| u32::from(c)).sum::<u32>()
            + u32::from(self.unknown_enemies)
    }

    /// Own pieces lost so far
    pub fn own_lost(&self) -> u32 {
        PIECES_PER_SIDE as u32 - self.own_counts.iter().map(|&c| u32::from(c)).sum::<u32>()
    }
}

const BOARD_TEMPLATE: &str = "
                    O13
                 O12 I6  O14
              O11        I7 O15
           O10 I5              O16
        O9 I4         C0      I8 O17
           O8                    I0 O0
              O7 I3              O1
                 O6        I1 O2
                    O5 I2  O3
                       O4
";

impl fmt::Display for BeliefState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = BOARD_TEMPLATE.to_string();
        // highest index first so that O1 never clobbers the prefix of O13
        for cell in (0..CELL_COUNT).rev() {
            let Some((ring, index)) = locate(cell) else {
                continue;
            };
            let label = format!("{}{}", ring.label(), index);
            let value = match self.squares[cell] {
                Square::Empty => "..".to_string(),
                square => square.code(),
            };
            board = board.replace(&label, &value);
        }
        writeln!(f, "{board}")?;
        writeln!(f, "Turns: {}", self.turns)?;
        writeln!(f, "Player Counts: {:?}", self.own_counts)?;
        writeln!(f, "Player Reveals: {:?}", self.own_reveals)?;
        writeln!(f, "Opponent Captures: {:?}", self.captures)?;
        writeln!(
            f,
            "Opponent Counts: {:?} + {} unknown",
            self.enemy_counts, self.unknown_enemies
        )?;
        write!(
            f,
            "Probabilities: {:?}",
            self.get_opponent_piece_probabilities()
        )
    }
}
