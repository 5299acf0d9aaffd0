//! Bounded undo/redo history for single-cell edits

use crate::grid::{CellChange, Grid};
use std::collections::VecDeque;

/// Maximum number of undo entries kept before the oldest are dropped
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Undo/redo stacks over committed [`CellChange`]s
///
/// Undo re-applies a change's `before` content, redo its `after` content;
/// both go through [`Grid::apply_cell`] so nothing is re-recorded. Any new
/// edit after an undo discards the redo stack (branching history is not
/// kept).
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<CellChange>,
    redo_stack: Vec<CellChange>,
    cap: usize,
}

impl History {
    /// Create a history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAP)
    }

    /// Create a history with a custom capacity
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(cap),
            redo_stack: Vec::new(),
            cap,
        }
    }

    /// Record a committed edit, truncating the oldest entries beyond the cap
    pub fn push(&mut self, change: CellChange) {
        self.undo_stack.push_back(change);
        while self.undo_stack.len() > self.cap {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Revert the most recent edit; returns false if there is nothing to undo
    pub fn undo(&mut self, grid: &mut Grid) -> bool {
        match self.undo_stack.pop_back() {
            Some(change) => {
                grid.apply_cell(change.col, change.row, change.before.clone());
                self.redo_stack.push(change);
                true
            }
            None => false,
        }
    }

    /// Replay the most recently undone edit; returns false if there is none
    pub fn redo(&mut self, grid: &mut Grid) -> bool {
        match self.redo_stack.pop() {
            Some(change) => {
                grid.apply_cell(change.col, change.row, change.after.clone());
                self.undo_stack.push_back(change);
                true
            }
            None => false,
        }
    }

    /// Whether an undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of recorded undo entries
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Whether the undo stack is empty
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_undo_redo_cycle() {
        let mut grid = Grid::new();
        let mut history = History::new();

        history.push(grid.commit_input(0, 0, "5"));
        history.push(grid.commit_input(0, 0, "9"));
        assert_eq!(grid.value(0, 0), CellValue::Number(9.0));

        assert!(history.undo(&mut grid));
        assert_eq!(grid.value(0, 0), CellValue::Number(5.0));

        assert!(history.redo(&mut grid));
        assert_eq!(grid.value(0, 0), CellValue::Number(9.0));
    }

    #[test]
    fn test_undo_restores_empty() {
        let mut grid = Grid::new();
        let mut history = History::new();

        history.push(grid.commit_input(2, 2, "hello"));
        assert!(history.undo(&mut grid));
        assert_eq!(grid.value(2, 2), CellValue::Null);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut grid = Grid::new();
        let mut history = History::new();

        history.push(grid.commit_input(0, 0, "5"));
        history.push(grid.commit_input(0, 0, "9"));
        history.undo(&mut grid);
        assert!(history.can_redo());

        history.push(grid.commit_input(0, 0, "7"));
        assert!(!history.can_redo());
        assert!(!history.redo(&mut grid));
        assert_eq!(grid.value(0, 0), CellValue::Number(7.0));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut grid = Grid::new();
        let mut history = History::new();
        assert!(!history.undo(&mut grid));
        assert!(!history.redo(&mut grid));
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut grid = Grid::new();
        let mut history = History::with_capacity(3);

        for i in 0..5 {
            history.push(grid.commit_input(0, 0, &i.to_string()));
        }
        assert_eq!(history.len(), 3);

        // Undoing everything lands on the oldest retained entry's before
        // state, which is the value "1" (entries for "0" and "1" dropped).
        while history.undo(&mut grid) {}
        assert_eq!(grid.value(0, 0), CellValue::Number(1.0));
    }
}
