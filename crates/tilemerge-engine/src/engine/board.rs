use std::mem;

use log::{debug, trace, warn};

use crate::{
    InvalidTileValueError,
    core::{
        CellPos, CellValues, Direction, Grid, Tile, WINNING_VALUE, is_valid_tile_value,
        line::slide_values, tile::TileIdAllocator,
    },
};

use super::{
    history::{History, Snapshot},
    move_plan::{MovePlan, Motion},
    spawner::{SpawnPolicy, SpawnSeed, TileSpawner},
};

/// Construction parameters of a [`Board`].
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    /// Spawn seed; a random one is drawn when `None`.
    pub seed: Option<SpawnSeed>,
    /// Number of moves that can be undone.
    pub undo_depth: usize,
    pub spawn_policy: SpawnPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: None,
            undo_depth: 1,
            spawn_policy: SpawnPolicy::default(),
        }
    }
}

impl BoardConfig {
    fn spawner(&self) -> TileSpawner {
        match self.seed {
            Some(seed) => TileSpawner::with_seed(seed, self.spawn_policy),
            None => TileSpawner::with_seed(rand::random(), self.spawn_policy),
        }
    }
}

/// Result of a committed move, as reported by [`Board::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSummary {
    pub direction: Direction,
    pub score_delta: u64,
    pub merges: usize,
    /// Tile spawned after the move (`None` only if the grid was full).
    pub spawned: Option<Tile>,
}

#[derive(Debug, Clone, Default, derive_more::IsVariant)]
enum MoveState {
    #[default]
    Settled,
    Pending(MovePlan),
}

/// The board state machine: grid, score, history and the pending move.
///
/// Moves follow a two-phase protocol:
///
/// 1. [`move_tiles`](Self::move_tiles) computes the resulting grid and the
///    per-tile [`Motion`]s without touching the tiles on the board
/// 2. the caller animates the motions (optionally through
///    [`set_motion_progress`](Self::set_motion_progress))
/// 3. [`finalize`](Self::finalize) commits the computed grid and score
///
/// After finalizing, the caller spawns a new tile with
/// [`spawn_random`](Self::spawn_random). [`step`](Self::step) runs all three
/// phases at once for callers that do not animate.
///
/// A pending move that is never finalized is discarded by the next call to
/// `move_tiles`, `undo`, `redo`, `reset` or `spawn_random`.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, BoardConfig, Direction};
///
/// let mut board = Board::from_values(
///     [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]],
///     BoardConfig::default(),
/// )
/// .unwrap();
///
/// assert!(board.move_tiles(Direction::Left));
/// assert_eq!(board.motions().len(), 2);
/// // Nothing is committed until the move is finalized.
/// assert_eq!(board.cell_values()[0], [2, 2, 0, 0]);
///
/// board.finalize();
/// assert_eq!(board.cell_values()[0], [4, 0, 0, 0]);
/// assert_eq!(board.score(), 4);
///
/// assert!(board.undo());
/// assert_eq!(board.cell_values()[0], [2, 2, 0, 0]);
/// assert_eq!(board.score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    score: u64,
    history: History,
    spawner: TileSpawner,
    ids: TileIdAllocator,
    state: MoveState,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Number of tiles spawned on a fresh board.
    pub const INITIAL_TILES: usize = 2;

    /// Creates a board with a random seed and two spawned tiles.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic spawning.
    #[must_use]
    pub fn with_seed(seed: SpawnSeed) -> Self {
        Self::with_config(BoardConfig {
            seed: Some(seed),
            ..BoardConfig::default()
        })
    }

    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        let mut board = Self::empty(&config);
        board.spawn_initial();
        board
    }

    /// Builds a board holding exactly `values` (`0` = empty), without spawning.
    pub fn from_values(
        values: CellValues,
        config: BoardConfig,
    ) -> Result<Self, InvalidTileValueError> {
        let mut board = Self::empty(&config);
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_valid_tile_value(value) {
                    return Err(InvalidTileValueError { value, row, col });
                }
                let tile = Tile::new(board.ids.allocate(), value, CellPos::new(row, col));
                board.grid.place(tile);
            }
        }
        Ok(board)
    }

    fn empty(config: &BoardConfig) -> Self {
        Self {
            grid: Grid::EMPTY,
            score: 0,
            history: History::new(config.undo_depth),
            spawner: config.spawner(),
            ids: TileIdAllocator::default(),
            state: MoveState::Settled,
        }
    }

    fn spawn_initial(&mut self) {
        for _ in 0..Self::INITIAL_TILES {
            self.spawn_random(None);
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Tiles currently on the board, in row-major order.
    ///
    /// While a move is pending these are the pre-move tiles, with their
    /// continuous positions at the current animation progress.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.tiles()
    }

    #[must_use]
    pub fn cell_values(&self) -> CellValues {
        self.grid.values()
    }

    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellPos> {
        self.grid.empty_cells().to_vec()
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.grid.max_value()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns whether a move is computed but not yet finalized.
    #[must_use]
    pub fn is_move_pending(&self) -> bool {
        self.state.is_pending()
    }

    #[must_use]
    pub fn pending_move(&self) -> Option<&MovePlan> {
        match &self.state {
            MoveState::Settled => None,
            MoveState::Pending(plan) => Some(plan),
        }
    }

    /// Motion records of the pending move (empty when settled).
    #[must_use]
    pub fn motions(&self) -> &[Motion] {
        self.pending_move().map_or(&[], MovePlan::motions)
    }

    /// Attempts to slide and merge all tiles toward `direction`.
    ///
    /// Returns `true` if the grid would change; the move is then pending until
    /// [`finalize`](Self::finalize) is called. Returns `false` and leaves the
    /// board untouched if the move changes nothing.
    pub fn move_tiles(&mut self, direction: Direction) -> bool {
        self.discard_pending();

        let Some(plan) = MovePlan::compute(&self.grid, direction, &mut self.ids) else {
            trace!("move {direction}: no change");
            return false;
        };
        debug!(
            "move {direction}: {} motions, {} merges, +{} points",
            plan.motions().len(),
            plan.merges(),
            plan.score_delta()
        );
        self.state = MoveState::Pending(plan);
        true
    }

    /// Moves the continuous positions of the pending move's tiles to `progress`.
    ///
    /// `progress` is clamped to `0.0..=1.0`. Grid cells and tile values are not
    /// changed. Does nothing when no move is pending.
    pub fn set_motion_progress(&mut self, progress: f32) {
        let MoveState::Pending(plan) = &self.state else {
            return;
        };
        for motion in plan.motions() {
            if let Some(tile) = self.grid.get_mut(motion.from) {
                tile.set_point(motion.position_at(progress));
            }
        }
    }

    /// Commits the pending move: grid, tile values and positions, and score.
    ///
    /// The pre-move state is recorded for [`undo`](Self::undo). Calling this
    /// without a pending move is a caller bug; it panics in debug builds and is
    /// ignored otherwise.
    pub fn finalize(&mut self) {
        debug_assert!(
            self.state.is_pending(),
            "finalize called without a pending move"
        );
        let MoveState::Pending(plan) = mem::take(&mut self.state) else {
            warn!("finalize called without a pending move; ignored");
            return;
        };

        self.grid.settle();
        self.history.record(Snapshot {
            grid: self.grid.clone(),
            score: self.score,
        });
        self.score += plan.score_delta();
        self.grid = plan.into_grid();
    }

    /// Spawns a tile in a uniformly chosen empty cell.
    ///
    /// The value is drawn from the spawn policy unless `value` forces one.
    /// Returns the spawned tile, or `None` if the grid is full.
    pub fn spawn_random(&mut self, value: Option<u32>) -> Option<Tile> {
        self.discard_pending();

        let empty = self.grid.empty_cells();
        let pos = self.spawner.pick_cell(&empty)?;
        let value = value.unwrap_or_else(|| self.spawner.draw_value());
        debug_assert!(is_valid_tile_value(value), "invalid spawn value {value}");

        let tile = Tile::new(self.ids.allocate(), value, pos);
        self.grid.place(tile);
        trace!("spawned {value} at ({}, {})", pos.row, pos.col);
        Some(tile)
    }

    /// Moves, finalizes and spawns in one call.
    ///
    /// Returns `None` if the move changes nothing.
    pub fn step(&mut self, direction: Direction) -> Option<MoveSummary> {
        if !self.move_tiles(direction) {
            return None;
        }
        let (score_delta, merges) = self
            .pending_move()
            .map(|plan| (plan.score_delta(), plan.merges()))?;
        self.finalize();
        let spawned = self.spawn_random(None);
        Some(MoveSummary {
            direction,
            score_delta,
            merges,
            spawned,
        })
    }

    /// Restores the state before the last committed move.
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.discard_pending();
        let Some(snapshot) = self.history.undo(self.snapshot()) else {
            return false;
        };
        debug!("undo: score {} -> {}", self.score, snapshot.score);
        self.restore(snapshot);
        true
    }

    /// Re-applies the last undone move.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.discard_pending();
        let Some(snapshot) = self.history.redo(self.snapshot()) else {
            return false;
        };
        debug!("redo: score {} -> {}", self.score, snapshot.score);
        self.restore(snapshot);
        true
    }

    /// Starts a new game: clears tiles, history and score, then spawns two tiles.
    pub fn reset(&mut self) {
        self.discard_pending();
        self.grid.clear();
        self.history.clear();
        self.score = 0;
        self.spawn_initial();
        debug!("board reset");
    }

    /// Whether a move toward `direction` would change the grid.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let values = self.grid.values();
        slide_values(&values, direction).0 != values
    }

    /// Whether any direction changes the grid.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        Direction::ALL.into_iter().any(|d| self.can_move(d))
    }

    /// Whether the grid is full and no two adjacent tiles share a value.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.grid.is_full() && !self.grid.has_adjacent_equal()
    }

    /// Whether some tile has reached [`WINNING_VALUE`].
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.grid.max_value() >= WINNING_VALUE
    }

    fn snapshot(&self) -> Snapshot {
        let mut grid = self.grid.clone();
        grid.settle();
        Snapshot {
            grid,
            score: self.score,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.grid = snapshot.grid;
        self.score = snapshot.score;
    }

    fn discard_pending(&mut self) {
        if let MoveState::Pending(plan) = mem::take(&mut self.state) {
            trace!("discarding pending move {}", plan.direction());
            self.grid.settle();
        }
    }
}
