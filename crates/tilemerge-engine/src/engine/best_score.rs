use std::fmt;

/// Persistence of the best score across sessions.
///
/// Loading never fails: a store that cannot read its backing data reports 0.
/// Saving is best effort.
pub trait BestScoreStore: fmt::Debug {
    fn load(&mut self) -> u64;
    fn save(&mut self, score: u64);
}

/// Store that keeps the best score in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryBestScore {
    score: u64,
}

impl MemoryBestScore {
    #[must_use]
    pub const fn new(score: u64) -> Self {
        Self { score }
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&mut self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) {
        self.score = score;
    }
}
