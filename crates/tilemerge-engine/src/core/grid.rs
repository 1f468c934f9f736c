use arrayvec::ArrayVec;

use super::{
    CELL_COUNT, COLS, MAX_LINE_LEN, ROWS,
    direction::Direction,
    merged_value,
    tile::{CellPos, Tile},
};

/// Plain value view of the grid; `0` marks an empty cell.
pub type CellValues = [[u32; COLS]; ROWS];

/// Sparse 4×4 tile storage.
///
/// Each cell holds at most one [`Tile`]; a tile's stored `pos` always equals the
/// cell it is stored in.
///
/// # Example
///
/// ```
/// use tilemerge_engine::Grid;
///
/// let grid = Grid::EMPTY;
/// assert_eq!(grid.empty_cells().len(), 16);
/// assert!(!grid.is_full());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [[Option<Tile>; COLS]; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const EMPTY: Self = Self {
        cells: [[None; COLS]; ROWS],
    };

    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<&Tile> {
        self.cells[pos.row][pos.col].as_ref()
    }

    pub(crate) fn get_mut(&mut self, pos: CellPos) -> Option<&mut Tile> {
        self.cells[pos.row][pos.col].as_mut()
    }

    /// Stores `tile` at its own position.
    pub(crate) fn place(&mut self, tile: Tile) {
        let cell = &mut self.cells[tile.row()][tile.col()];
        debug_assert!(cell.is_none(), "cell {:?} already occupied", tile.pos());
        *cell = Some(tile);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Snaps every tile's continuous position back onto its cell.
    pub(crate) fn settle(&mut self) {
        for tile in self.cells.iter_mut().flatten().flatten() {
            tile.settle();
        }
    }

    /// Iterates over the tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    #[must_use]
    pub fn values(&self) -> CellValues {
        self.cells
            .map(|row| row.map(|cell| cell.as_ref().map_or(0, Tile::value)))
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<CellPos, CELL_COUNT> {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| CellPos::new(row, col)))
            .filter(|&pos| self.get(pos).is_none())
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Returns whether two orthogonally adjacent tiles share a value.
    ///
    /// Only the forward neighbours `(row + 1, col)` and `(row, col + 1)` are
    /// visited, which covers every adjacent pair exactly once.
    #[must_use]
    pub fn has_adjacent_equal(&self) -> bool {
        let values = self.values();
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| {
                let value = values[row][col];
                value != 0
                    && merged_value(value).is_some()
                    && ((row + 1 < ROWS && values[row + 1][col] == value)
                        || (col + 1 < COLS && values[row][col + 1] == value))
            })
        })
    }

    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|tile| u64::from(tile.value())).sum()
    }

    /// Non-empty tiles of one line, destination edge first.
    pub(crate) fn line_tiles(
        &self,
        direction: Direction,
        line: usize,
    ) -> ArrayVec<Tile, MAX_LINE_LEN> {
        direction
            .line_cells(line)
            .filter_map(|pos| self.get(pos).copied())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::tile::TileIdAllocator;

    /// Builds a grid from a value matrix, assigning fresh ids in row-major order.
    pub(crate) fn grid_from_values(values: CellValues) -> Grid {
        let mut ids = TileIdAllocator::default();
        let mut grid = Grid::EMPTY;
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    grid.place(Tile::new(ids.allocate(), value, CellPos::new(row, col)));
                }
            }
        }
        grid
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.values(), [[0; COLS]; ROWS]);
        assert_eq!(grid.empty_cells().len(), CELL_COUNT);
        assert_eq!(grid.max_value(), 0);
        assert!(!grid.is_full());
        assert!(!grid.has_adjacent_equal());
    }

    #[test]
    fn test_values_roundtrip() {
        let values = [[2, 0, 0, 4], [0, 8, 0, 0], [0, 0, 16, 0], [32, 0, 0, 2048]];
        let grid = grid_from_values(values);
        assert_eq!(grid.values(), values);
        assert_eq!(grid.tile_count(), 6);
        assert_eq!(grid.max_value(), 2048);
        assert_eq!(grid.total_value(), 2 + 4 + 8 + 16 + 32 + 2048);
    }

    #[test]
    fn test_empty_cells_skip_occupied() {
        let grid = grid_from_values([[2, 2, 2, 2], [2, 2, 2, 2], [2, 2, 0, 2], [2, 2, 2, 0]]);
        let empty = grid.empty_cells();
        assert_eq!(empty.as_slice(), [CellPos::new(2, 2), CellPos::new(3, 3)]);
    }

    #[test]
    fn test_full_grid_without_pairs() {
        let grid = grid_from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(grid.is_full());
        assert!(!grid.has_adjacent_equal());
    }

    #[test]
    fn test_adjacent_pair_detection() {
        // Vertical pair in the last column.
        let grid = grid_from_values([[2, 4, 2, 4], [4, 2, 4, 8], [2, 4, 2, 8], [4, 2, 4, 2]]);
        assert!(grid.has_adjacent_equal());

        // Horizontal pair in the last row.
        let grid = grid_from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 16, 16]]);
        assert!(grid.has_adjacent_equal());

        // Equal values on a diagonal do not count.
        let grid = grid_from_values([[2, 4, 0, 0], [4, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(!grid.has_adjacent_equal());
    }

    #[test]
    fn test_line_tiles_follow_direction() {
        let grid = grid_from_values([[2, 0, 4, 8], [0; 4], [0; 4], [0; 4]]);
        let left: Vec<_> = grid
            .line_tiles(Direction::Left, 0)
            .iter()
            .map(Tile::value)
            .collect();
        assert_eq!(left, [2, 4, 8]);
        let right: Vec<_> = grid
            .line_tiles(Direction::Right, 0)
            .iter()
            .map(Tile::value)
            .collect();
        assert_eq!(right, [8, 4, 2]);
        assert!(grid.line_tiles(Direction::Left, 1).is_empty());
    }
}
