//! Pieces, colors, moves and combat resolution
//!
//! These are the small value types shared by the match engine, the belief
//! state and the searchers.

use std::fmt;

use crate::topology::{Cell, OUTER_CELLS};

/// Number of pieces each color places during setup
pub const PIECES_PER_SIDE: usize = 9;

/// Number of pieces of each type in a legal setup
pub const PIECES_PER_TYPE: usize = 3;

/// The three piece types, in the fixed order used for every per-type counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    Rock,
    Paper,
    Scissors,
}

impl PieceType {
    /// All piece types in counter order
    pub const ALL: [PieceType; 3] = [PieceType::Rock, PieceType::Paper, PieceType::Scissors];

    /// Position of this type in per-type counter arrays
    pub fn index(self) -> usize {
        match self {
            PieceType::Rock => 0,
            PieceType::Paper => 1,
            PieceType::Scissors => 2,
        }
    }

    /// Inverse of [`PieceType::index`], wrapping modulo 3
    pub fn from_index(index: usize) -> PieceType {
        Self::ALL[index % 3]
    }

    /// The type this one defeats
    pub fn beats(self) -> PieceType {
        Self::from_index(self.index() + 2)
    }

    /// The type that defeats this one
    pub fn counter(self) -> PieceType {
        Self::from_index(self.index() + 1)
    }

    /// Single-letter code (`R`, `P`, `S`)
    pub fn letter(self) -> char {
        match self {
            PieceType::Rock => 'R',
            PieceType::Paper => 'P',
            PieceType::Scissors => 'S',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The two sides of a match; Blue sets up on cells 0-8, Red on 9-17
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    /// Both colors, Blue first
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    pub fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Red => 1,
        }
    }

    pub fn opponent(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// The nine outer cells this color fills during setup
    pub fn home_cells(self) -> std::ops::Range<Cell> {
        let start = self.index() * PIECES_PER_SIDE;
        debug_assert!(start + PIECES_PER_SIDE <= OUTER_CELLS);
        start..start + PIECES_PER_SIDE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => write!(f, "Blue"),
            Color::Red => write!(f, "Red"),
        }
    }
}

/// A piece on the authoritative board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    /// Set once the piece has taken part in a challenge; never cleared
    pub revealed: bool,
}

impl Piece {
    /// A freshly placed, hidden piece
    pub fn new(kind: PieceType, color: Color) -> Self {
        Piece {
            kind,
            color,
            revealed: false,
        }
    }
}

/// A move from one cell to an adjacent one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

impl From<(Cell, Cell)> for Move {
    fn from((from, to): (Cell, Cell)) -> Self {
        Move { from, to }
    }
}

/// Result of a half-move from the mover's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The destination was empty
    Move,
    /// A challenge between equal types; nothing moves
    Tie,
    /// The mover defeated the defender and took its cell
    Win,
    /// The mover was defeated and removed
    Loss,
}

impl Outcome {
    /// The signed score the engine reports for this outcome
    pub fn score(self) -> i32 {
        match self {
            Outcome::Move | Outcome::Tie => 0,
            Outcome::Win => 1,
            Outcome::Loss => -1,
        }
    }

    /// Single-letter code (`M`, `T`, `W`, `L`)
    pub fn code(self) -> char {
        match self {
            Outcome::Move => 'M',
            Outcome::Tie => 'T',
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
        }
    }
}

/// Resolves a challenge by cyclic dominance: Rock beats Scissors, Paper beats
/// Rock, Scissors beats Paper, equal types tie.
pub fn resolve_challenge(attacker: PieceType, defender: PieceType) -> Outcome {
    if attacker == defender {
        Outcome::Tie
    } else if attacker.beats() == defender {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Returns true if `pieces` holds exactly three of each type
pub fn is_valid_layout(pieces: &[PieceType]) -> bool {
    pieces.len() == PIECES_PER_SIDE
        && PieceType::ALL
            .iter()
            .all(|kind| pieces.iter().filter(|p| *p == kind).count() == PIECES_PER_TYPE)
}

/// The layout `R P S R P S R P S`
pub fn standard_layout() -> [PieceType; PIECES_PER_SIDE] {
    let mut layout = [PieceType::Rock; PIECES_PER_SIDE];
    for (i, slot) in layout.iter_mut().enumerate() {
        *slot = PieceType::from_index(i);
    }
    layout
}
