//! Static board topology
//!
//! The board has 28 cells arranged in three rings: an outer ring of 18 cells
//! (indices 0-17), an inner ring of 9 cells (18-26) and a single center cell
//! (27). Every outer pair `2j, 2j + 1` touches inner cell `j`, and every inner
//! cell touches the center.

/// Index of a board cell, `0..CELL_COUNT`
pub type Cell = usize;

/// Total number of cells on the board
pub const CELL_COUNT: usize = 28;

/// Number of cells on the outer ring
pub const OUTER_CELLS: usize = 18;

/// Number of cells on the inner ring
pub const INNER_CELLS: usize = 9;

/// First index of the inner ring
pub const INNER_START: Cell = OUTER_CELLS;

/// The center cell
pub const CENTER: Cell = OUTER_CELLS + INNER_CELLS;

/// The topological band a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ring {
    Outer,
    Inner,
    Center,
}

impl Ring {
    /// Short label used in board renderings (`O`, `I`, `C`)
    pub fn label(self) -> char {
        match self {
            Ring::Outer => 'O',
            Ring::Inner => 'I',
            Ring::Center => 'C',
        }
    }
}

/// Returns the ring of a cell and its position within that ring,
/// or `None` for an index that is not on the board
pub fn locate(cell: Cell) -> Option<(Ring, usize)> {
    match cell {
        c if c < INNER_START => Some((Ring::Outer, c)),
        c if c < CENTER => Some((Ring::Inner, c - INNER_START)),
        CENTER => Some((Ring::Center, 0)),
        _ => None,
    }
}

/// Returns true if `cell` names a cell on the board
pub fn is_valid(cell: Cell) -> bool {
    cell < CELL_COUNT
}

/// Returns the cells adjacent to `cell`
///
/// The enumeration order is fixed and move generation depends on it:
///
/// - outer `i`: outer `i + 1`, outer `i - 1`, inner `i / 2`
/// - inner `j`: inner `j + 1`, inner `j - 1`, outer `2j`, outer `2j + 1`, center
/// - center: inner 0 through 8
///
/// Indices off the board have no neighbours.
pub fn adjacent(cell: Cell) -> Vec<Cell> {
    match locate(cell) {
        Some((Ring::Outer, i)) => vec![
            (i + 1) % OUTER_CELLS,
            (i + OUTER_CELLS - 1) % OUTER_CELLS,
            INNER_START + i / 2,
        ],
        Some((Ring::Inner, j)) => vec![
            INNER_START + (j + 1) % INNER_CELLS,
            INNER_START + (j + INNER_CELLS - 1) % INNER_CELLS,
            2 * j,
            2 * j + 1,
            CENTER,
        ],
        Some((Ring::Center, _)) => (INNER_START..CENTER).collect(),
        None => Vec::new(),
    }
}

/// Returns true if `to` is adjacent to `from`
pub fn is_adjacent(from: Cell, to: Cell) -> bool {
    adjacent(from).contains(&to)
}
