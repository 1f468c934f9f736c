use serde::Serialize;

/// Per-game statistics tracked by a [`GameSession`](super::GameSession).
///
/// - **Moves**: committed moves (no-op moves are not counted)
/// - **Merges**: merge events across all moves
/// - **Undos**: successful undo operations
/// - **Highest tile**: largest tile value seen during the game
///
/// # Example
///
/// ```
/// use tilemerge_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_move(2, 8);
/// stats.complete_move(0, 8);
///
/// assert_eq!(stats.moves(), 2);
/// assert_eq!(stats.merges(), 2);
/// assert_eq!(stats.highest_tile(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    moves: usize,
    merges: usize,
    undos: usize,
    highest_tile: u32,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moves: 0,
            merges: 0,
            undos: 0,
            highest_tile: 0,
        }
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn merges(&self) -> usize {
        self.merges
    }

    #[must_use]
    pub const fn undos(&self) -> usize {
        self.undos
    }

    #[must_use]
    pub const fn highest_tile(&self) -> u32 {
        self.highest_tile
    }

    /// Updates statistics after a committed move.
    pub fn complete_move(&mut self, merges: usize, max_tile: u32) {
        self.moves += 1;
        self.merges += merges;
        self.highest_tile = self.highest_tile.max(max_tile);
    }

    pub fn record_undo(&mut self) {
        self.undos += 1;
    }

    /// Raises the highest tile without counting a move (e.g. the initial spawns).
    pub fn observe_tile(&mut self, value: u32) {
        self.highest_tile = self.highest_tile.max(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_tile_never_decreases() {
        let mut stats = GameStats::new();
        stats.complete_move(1, 64);
        stats.complete_move(0, 32);
        stats.observe_tile(16);
        assert_eq!(stats.highest_tile(), 64);
    }

    #[test]
    fn test_serializes_counters() {
        let mut stats = GameStats::new();
        stats.complete_move(3, 16);
        stats.record_undo();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"moves": 1, "merges": 3, "undos": 1, "highest_tile": 16})
        );
    }
}
