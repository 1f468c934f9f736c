use serde::{Deserialize, Serialize};

/// Stable identity of a tile.
///
/// Identities are never reused within a board: merging two tiles retires both
/// identities and the merged tile receives a fresh one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
pub struct TileId(u64);

impl TileId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out fresh tile identities.
#[derive(Debug, Clone, Default)]
pub(crate) struct TileIdAllocator {
    next: u64,
}

impl TileIdAllocator {
    pub(crate) fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// Grid coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Continuous position of the cell's origin, in cell units.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn point(self) -> Point {
        Point {
            x: self.col as f32,
            y: self.row as f32,
        }
    }
}

/// Continuous position in cell units (`x` along columns, `y` along rows).
///
/// Renderers scale this by their cell size; the engine only interpolates it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Linear interpolation from `self` toward `to` (`t = 0` is `self`, `t = 1` is `to`).
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// A numbered tile on the board.
///
/// `pos` is where the tile rests on the grid. `point` is its continuous position,
/// which differs from `pos` only while a move is being animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    id: TileId,
    value: u32,
    pos: CellPos,
    point: Point,
}

impl Tile {
    pub(crate) fn new(id: TileId, value: u32, pos: CellPos) -> Self {
        Self {
            id,
            value,
            pos,
            point: pos.point(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub const fn pos(&self) -> CellPos {
        self.pos
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.pos.row
    }

    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    #[must_use]
    pub const fn point(&self) -> Point {
        self.point
    }

    #[must_use]
    pub const fn x(&self) -> f32 {
        self.point.x
    }

    #[must_use]
    pub const fn y(&self) -> f32 {
        self.point.y
    }

    /// The same tile resting at `pos`.
    pub(crate) fn moved_to(self, pos: CellPos) -> Self {
        Self::new(self.id, self.value, pos)
    }

    pub(crate) fn set_point(&mut self, point: Point) {
        self.point = point;
    }

    /// Snaps the continuous position back onto the grid cell.
    pub(crate) fn settle(&mut self) {
        self.point = self.pos.point();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_never_reuses_ids() {
        let mut ids = TileIdAllocator::default();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
        assert_eq!(c.get(), 2);
    }

    #[test]
    fn test_new_tile_rests_on_its_cell() {
        let tile = Tile::new(TileId(7), 8, CellPos::new(2, 3));
        assert_eq!(tile.point(), Point { x: 3.0, y: 2.0 });
        assert_eq!((tile.row(), tile.col()), (2, 3));
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let from = CellPos::new(0, 0).point();
        let to = CellPos::new(2, 3).point();
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5), Point { x: 1.5, y: 1.0 });
    }

    #[test]
    fn test_settle_snaps_point_back() {
        let mut tile = Tile::new(TileId(0), 2, CellPos::new(1, 1));
        tile.set_point(Point { x: 0.25, y: 1.0 });
        assert_eq!(tile.x(), 0.25);
        tile.settle();
        assert_eq!(tile.point(), Point { x: 1.0, y: 1.0 });
    }
}
