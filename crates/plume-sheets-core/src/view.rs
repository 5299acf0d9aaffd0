//! Presentation view state: column widths, hidden columns, frozen panes

use std::collections::{HashMap, HashSet};

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Minimum column width a resize can reach
pub const MIN_COLUMN_WIDTH: f64 = 40.0;

/// Cosmetic/structural presentation state consumed by the rendering layer
///
/// The engine owns this state but attaches no meaning to it beyond the
/// freeze boundaries, which the sort operation uses to pin header rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    widths: HashMap<usize, f64>,
    hidden: HashSet<usize>,
    frozen_rows: usize,
    frozen_cols: usize,
}

impl ViewState {
    /// Create the default view state (one frozen header row)
    pub fn new() -> Self {
        Self {
            widths: HashMap::new(),
            hidden: HashSet::new(),
            frozen_rows: 1,
            frozen_cols: 0,
        }
    }

    /// A column's width, falling back to the default
    pub fn column_width(&self, col: usize) -> f64 {
        self.widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Resize a column, clamping to the minimum width
    pub fn set_column_width(&mut self, col: usize, width: f64) {
        self.widths.insert(col, width.max(MIN_COLUMN_WIDTH));
    }

    /// Hide a column
    pub fn hide_column(&mut self, col: usize) {
        self.hidden.insert(col);
    }

    /// Show a previously hidden column
    pub fn show_column(&mut self, col: usize) {
        self.hidden.remove(&col);
    }

    /// Whether a column is hidden
    pub fn is_column_hidden(&self, col: usize) -> bool {
        self.hidden.contains(&col)
    }

    /// Number of leading rows pinned during vertical scroll (and excluded
    /// from sorting)
    pub fn frozen_rows(&self) -> usize {
        self.frozen_rows
    }

    /// Set the frozen-row boundary
    pub fn set_frozen_rows(&mut self, count: usize) {
        self.frozen_rows = count;
    }

    /// Number of leading columns pinned during horizontal scroll
    pub fn frozen_cols(&self) -> usize {
        self.frozen_cols
    }

    /// Set the frozen-column boundary
    pub fn set_frozen_cols(&mut self, count: usize) {
        self.frozen_cols = count;
    }

    /// Whether a row renders pinned
    pub fn is_row_frozen(&self, row: usize) -> bool {
        row < self.frozen_rows
    }

    /// Whether a column renders pinned
    pub fn is_column_frozen(&self, col: usize) -> bool {
        col < self.frozen_cols
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
