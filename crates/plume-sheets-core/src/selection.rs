//! Rectangular selection model

/// The normalized bounding box of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    /// Leftmost selected column
    pub min_col: usize,
    /// Topmost selected row
    pub min_row: usize,
    /// Rightmost selected column
    pub max_col: usize,
    /// Bottommost selected row
    pub max_row: usize,
}

/// Anchored rectangular selection
///
/// The anchor is the mouse-down point and stays fixed while the cursor
/// tracks the drag; the selected rectangle is the normalized span between
/// them, so it is well-defined regardless of drag direction. The active
/// cell (keyboard focus, formula bar) is always the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: (usize, usize),
    cursor: (usize, usize),
}

impl Selection {
    /// Create a single-cell selection
    pub fn new(col: usize, row: usize) -> Self {
        Self {
            anchor: (col, row),
            cursor: (col, row),
        }
    }

    /// Begin a new selection: anchor and cursor both move
    pub fn start(&mut self, col: usize, row: usize) {
        self.anchor = (col, row);
        self.cursor = (col, row);
    }

    /// Extend the selection: only the cursor moves, the anchor stays put
    pub fn extend(&mut self, col: usize, row: usize) {
        self.cursor = (col, row);
    }

    /// The focused cell as `(col, row)` — always the anchor
    pub fn active_cell(&self) -> (usize, usize) {
        self.anchor
    }

    /// The normalized selection rectangle
    pub fn rect(&self) -> SelectionRect {
        SelectionRect {
            min_col: self.anchor.0.min(self.cursor.0),
            min_row: self.anchor.1.min(self.cursor.1),
            max_col: self.anchor.0.max(self.cursor.0),
            max_row: self.anchor.1.max(self.cursor.1),
        }
    }

    /// Whether a coordinate falls inside the selection rectangle
    pub fn contains(&self, col: usize, row: usize) -> bool {
        let r = self.rect();
        col >= r.min_col && col <= r.max_col && row >= r.min_row && row <= r.max_row
    }

    /// Whether the selection covers more than one cell
    pub fn is_multi(&self) -> bool {
        self.anchor != self.cursor
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
