use serde::{Deserialize, Serialize};

use super::{COLS, ROWS, tile::CellPos};

/// Slide direction of a move.
///
/// Every direction splits the grid into lines (rows for [`Left`](Self::Left) and
/// [`Right`](Self::Right), columns for [`Up`](Self::Up) and [`Down`](Self::Down)).
/// Within a line, index 0 is the cell at the destination edge, so a move always
/// collapses tiles "toward index 0".
///
/// # Example
///
/// ```
/// use tilemerge_engine::{CellPos, Direction};
///
/// // Sliding right, the first cell of row 1 is its rightmost one.
/// assert_eq!(Direction::Right.cell(1, 0), CellPos::new(1, 3));
/// assert_eq!(Direction::Down.cell(2, 0), CellPos::new(3, 2));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Direction {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("up")]
    Up,
    #[display("down")]
    Down,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Number of independent lines a move in this direction collapses.
    #[must_use]
    pub const fn line_count(self) -> usize {
        match self {
            Self::Left | Self::Right => ROWS,
            Self::Up | Self::Down => COLS,
        }
    }

    /// Number of cells in each line.
    #[must_use]
    pub const fn line_len(self) -> usize {
        match self {
            Self::Left | Self::Right => COLS,
            Self::Up | Self::Down => ROWS,
        }
    }

    /// Grid cell at `index` of line `line`, counted from the destination edge.
    #[must_use]
    pub const fn cell(self, line: usize, index: usize) -> CellPos {
        match self {
            Self::Left => CellPos::new(line, index),
            Self::Right => CellPos::new(line, COLS - 1 - index),
            Self::Up => CellPos::new(index, line),
            Self::Down => CellPos::new(ROWS - 1 - index, line),
        }
    }

    /// Cells of line `line` in traversal order (destination edge first).
    pub fn line_cells(self, line: usize) -> impl Iterator<Item = CellPos> {
        (0..self.line_len()).map(move |index| self.cell(line, index))
    }
}
