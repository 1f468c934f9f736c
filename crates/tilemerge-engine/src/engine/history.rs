use std::collections::VecDeque;

use crate::core::Grid;

/// Board state captured before a committed move.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    pub(crate) score: u64,
}

/// Bounded undo/redo stacks.
///
/// Holds at most `depth` undo snapshots; recording beyond that discards the
/// oldest one. Recording a new snapshot clears the redo stack.
#[derive(Debug, Clone)]
pub(crate) struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    depth: usize,
}

impl History {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(depth),
            redo: Vec::new(),
            depth,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        if self.depth == 0 {
            return;
        }
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
    }

    /// Pops the latest undo snapshot, keeping `current` for redo.
    pub(crate) fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo.pop_back()?;
        self.redo.push(current);
        Some(snapshot)
    }

    /// Pops the latest redo snapshot, keeping `current` for undo.
    pub(crate) fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push_back(current);
        Some(snapshot)
    }

    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
