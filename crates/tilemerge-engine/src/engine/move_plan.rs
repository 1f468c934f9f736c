use crate::core::{
    CellPos, Direction, Grid, Point, Tile, TileId,
    line::{self, Slot},
    merged_value,
    tile::TileIdAllocator,
};

/// Per-tile motion of a move, used to animate the transition.
///
/// Every tile present before the move gets exactly one record. Both halves of a
/// merge share the same `end` and `result_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Identity of the tile before the move.
    pub tile_id: TileId,
    /// Cell the tile rests on before the move.
    pub from: CellPos,
    /// Destination cell.
    pub to: CellPos,
    pub start: Point,
    pub end: Point,
    /// Whether this tile is one of the two halves of a merge.
    pub is_merge_source: bool,
    /// Identity of the tile occupying `to` once the move is finalized.
    pub result_id: TileId,
}

impl Motion {
    fn new(tile: &Tile, to: CellPos, is_merge_source: bool, result_id: TileId) -> Self {
        Self {
            tile_id: tile.id(),
            from: tile.pos(),
            to,
            start: tile.pos().point(),
            end: to.point(),
            is_merge_source,
            result_id,
        }
    }

    /// Position along the motion for `progress` in `0.0..=1.0`.
    #[must_use]
    pub fn position_at(&self, progress: f32) -> Point {
        self.start.lerp(self.end, progress.clamp(0.0, 1.0))
    }

    /// Whether the tile stays in place without merging.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.from == self.to && !self.is_merge_source
    }
}

/// A computed but not yet committed move.
///
/// Holds the grid the board will have once the move is finalized, together
/// with the motion records and the score the move earns.
#[derive(Debug, Clone)]
pub struct MovePlan {
    direction: Direction,
    grid: Grid,
    motions: Vec<Motion>,
    score_delta: u64,
    merges: usize,
}

impl MovePlan {
    /// Computes the move of `grid` toward `direction`.
    ///
    /// Returns `None` when the move would leave every line unchanged. Merged
    /// tiles receive fresh identities from `ids`.
    pub(crate) fn compute(
        grid: &Grid,
        direction: Direction,
        ids: &mut TileIdAllocator,
    ) -> Option<Self> {
        let mut next = Grid::EMPTY;
        let mut motions = Vec::with_capacity(grid.tile_count());
        let mut score_delta = 0;
        let mut merges = 0;

        for line in 0..direction.line_count() {
            let tiles = grid.line_tiles(direction, line);
            for (index, slot) in line::collapse(&tiles, Tile::value).into_iter().enumerate() {
                let dest = direction.cell(line, index);
                match slot {
                    Slot::Single(tile) => {
                        motions.push(Motion::new(&tile, dest, false, tile.id()));
                        next.place(tile.moved_to(dest));
                    }
                    Slot::Merged(first, second) => {
                        let value = merged_value(first.value()).unwrap_or(first.value());
                        let merged = Tile::new(ids.allocate(), value, dest);
                        motions.push(Motion::new(&first, dest, true, merged.id()));
                        motions.push(Motion::new(&second, dest, true, merged.id()));
                        score_delta += u64::from(merged.value());
                        merges += 1;
                        next.place(merged);
                    }
                }
            }
        }

        if next.values() == grid.values() {
            return None;
        }

        Some(Self {
            direction,
            grid: next,
            motions,
            score_delta,
            merges,
        })
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The grid after the move, before any spawn.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    #[must_use]
    pub fn score_delta(&self) -> u64 {
        self.score_delta
    }

    /// Number of merge events in the move.
    #[must_use]
    pub fn merges(&self) -> usize {
        self.merges
    }

    pub(crate) fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::{CellValues, grid::tests::grid_from_values};

    fn plan(values: CellValues, direction: Direction) -> Option<MovePlan> {
        let grid = grid_from_values(values);
        let mut ids = TileIdAllocator::default();
        for _ in 0..grid.tile_count() {
            ids.allocate();
        }
        MovePlan::compute(&grid, direction, &mut ids)
    }

    #[test]
    fn test_noop_move_returns_none() {
        let values = [[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]];
        assert!(plan(values, Direction::Left).is_none());
        assert!(plan(values, Direction::Up).is_none());
        assert!(plan(values, Direction::Right).is_some());
        assert!(plan(values, Direction::Down).is_some());
    }

    #[test]
    fn test_empty_grid_never_moves() {
        for direction in Direction::ALL {
            assert!(plan([[0; 4]; 4], direction).is_none());
        }
    }

    #[test]
    fn test_merge_plan_contents() {
        let plan = plan([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], Direction::Left).unwrap();
        assert_eq!(plan.direction(), Direction::Left);
        assert_eq!(plan.grid().values(), [[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(plan.score_delta(), 4);
        assert_eq!(plan.merges(), 1);

        let motions = plan.motions();
        assert_eq!(motions.len(), 2);
        assert!(motions.iter().all(|m| m.is_merge_source));
        assert!(motions.iter().all(|m| m.to == CellPos::new(0, 0)));
        assert_eq!(motions[0].result_id, motions[1].result_id);

        // The merged tile is a new entity.
        let merged = plan.grid().get(CellPos::new(0, 0)).unwrap();
        assert_eq!(merged.id(), motions[0].result_id);
        assert_ne!(merged.id(), motions[0].tile_id);
        assert_ne!(merged.id(), motions[1].tile_id);
    }

    #[test]
    fn test_one_motion_per_input_tile() {
        let values = [[2, 2, 2, 0], [4, 0, 4, 4], [0, 8, 0, 0], [16, 16, 16, 16]];
        let input_count = values.iter().flatten().filter(|&&v| v != 0).count();
        for direction in Direction::ALL {
            let plan = plan(values, direction).unwrap();
            assert_eq!(plan.motions().len(), input_count, "{direction}");
            let ids: HashSet<_> = plan.motions().iter().map(|m| m.tile_id).collect();
            assert_eq!(ids.len(), input_count, "{direction}");
        }
    }

    #[test]
    fn test_value_sum_is_conserved() {
        let values = [[2, 2, 2, 0], [4, 0, 4, 4], [0, 8, 0, 8], [16, 16, 16, 16]];
        let before: u32 = values.iter().flatten().sum();
        for direction in Direction::ALL {
            let plan = plan(values, direction).unwrap();
            assert_eq!(plan.grid().total_value(), u64::from(before), "{direction}");
        }
    }

    #[test]
    fn test_motion_endpoints_follow_direction() {
        let plan = plan([[0; 4], [0, 0, 0, 0], [0, 4, 0, 0], [0; 4]], Direction::Down).unwrap();
        let [motion] = plan.motions() else {
            panic!("expected a single motion");
        };
        assert_eq!(motion.from, CellPos::new(2, 1));
        assert_eq!(motion.to, CellPos::new(3, 1));
        assert_eq!(motion.start, Point { x: 1.0, y: 2.0 });
        assert_eq!(motion.end, Point { x: 1.0, y: 3.0 });
        assert_eq!(motion.position_at(0.5), Point { x: 1.0, y: 2.5 });
        assert_eq!(motion.position_at(7.0), motion.end);
        assert!(!motion.is_merge_source);
        assert_eq!(motion.tile_id, motion.result_id);
    }

    #[test]
    fn test_stationary_tiles_get_records() {
        let plan = plan([[2, 0, 0, 4], [0; 4], [0; 4], [0; 4]], Direction::Left).unwrap();
        let stationary: Vec<_> = plan.motions().iter().filter(|m| m.is_stationary()).collect();
        assert_eq!(stationary.len(), 1);
        assert_eq!(stationary[0].from, CellPos::new(0, 0));
    }
}
