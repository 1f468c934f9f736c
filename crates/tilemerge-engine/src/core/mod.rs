//! Grid data structures and the line-collapse algorithm.
//!
//! - [`Grid`] - Sparse 4×4 cell storage holding at most one [`Tile`] per cell
//! - [`Tile`] - Identity-bearing tile with value, cell and continuous position
//! - [`Direction`] - The four slide directions and their line orientation
//! - [`line`] - Collapse-and-merge of a single line

pub use self::{direction::*, grid::*, tile::*};

pub(crate) mod direction;
pub(crate) mod grid;
pub mod line;
pub(crate) mod tile;

/// Number of rows on the board.
pub const ROWS: usize = 4;
/// Number of columns on the board.
pub const COLS: usize = 4;
/// Total number of cells on the board.
pub const CELL_COUNT: usize = ROWS * COLS;
/// Length of the longest line (row or column).
pub const MAX_LINE_LEN: usize = if ROWS > COLS { ROWS } else { COLS };
/// Tile value that counts as a win.
pub const WINNING_VALUE: u32 = 2048;

/// Returns whether `value` can be carried by a tile (a power of two, at least 2).
#[must_use]
pub const fn is_valid_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Value of the tile produced by merging two `value` tiles.
///
/// `None` when the result does not fit in a tile; such tiles never merge.
#[must_use]
pub const fn merged_value(value: u32) -> Option<u32> {
    value.checked_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tile_values() {
        for exp in 1..=17 {
            assert!(is_valid_tile_value(1 << exp));
        }
        for value in [0, 1, 3, 6, 12, 2047] {
            assert!(!is_valid_tile_value(value), "{value} should be rejected");
        }
    }

    #[test]
    fn test_merged_value() {
        assert_eq!(merged_value(2), Some(4));
        assert_eq!(merged_value(1 << 30), Some(1 << 31));
        assert_eq!(merged_value(1 << 31), None);
    }
}
