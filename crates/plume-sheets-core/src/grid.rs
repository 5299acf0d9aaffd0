//! Grid store: the two-dimensional cell array and its structural edits

use crate::cell::{Cell, CellValue};
use crate::coerce::coerce_number;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Minimum (and default) number of columns a grid reports
pub const MIN_COLUMNS: usize = 10;

/// Number of rows in a freshly created grid
pub const DEFAULT_ROWS: usize = 5;

/// A single committed cell mutation, as captured for the undo history
#[derive(Debug, Clone, PartialEq)]
pub struct CellChange {
    /// Column index
    pub col: usize,
    /// Row index
    pub row: usize,
    /// Cell content before the edit (`None` = empty)
    pub before: Option<Cell>,
    /// Cell content after the edit (`None` = empty)
    pub after: Option<Cell>,
}

/// The two-dimensional cell store
///
/// Rows are sparse: a row shorter than the grid's column count is treated as
/// having trailing empty cells. The grid always retains at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Option<Cell>>>,
}

impl Grid {
    /// Create the default empty grid (a few empty rows, minimum width)
    pub fn new() -> Self {
        Self {
            rows: vec![vec![None; MIN_COLUMNS]; DEFAULT_ROWS],
        }
    }

    /// Build a grid from raw row data, ensuring at least one row
    pub fn from_rows(mut rows: Vec<Vec<Option<Cell>>>) -> Self {
        if rows.is_empty() {
            rows.push(vec![None; MIN_COLUMNS]);
        }
        Self { rows }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: the longest row, floored at [`MIN_COLUMNS`]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(MIN_COLUMNS)
    }

    /// Get a cell's content, `None` for empty or out-of-range positions
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Get a cell's stored value, `Null` for empty or out-of-range positions
    pub fn value(&self, col: usize, row: usize) -> CellValue {
        self.cell(col, row)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Null)
    }

    /// Place cell content at a position, growing the grid as needed
    ///
    /// Returns the previous content so callers can record the change. This
    /// is the raw setter used by undo/redo replay; it records nothing itself.
    pub fn apply_cell(&mut self, col: usize, row: usize, cell: Option<Cell>) -> Option<Cell> {
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if col >= r.len() {
            r.resize(col + 1, None);
        }
        std::mem::replace(&mut r[col], cell)
    }

    /// Commit raw user input at a position, running type detection
    ///
    /// Empty or whitespace-only input clears the cell. The returned
    /// [`CellChange`] is what the caller pushes onto the undo history.
    pub fn commit_input(&mut self, col: usize, row: usize, raw: &str) -> CellChange {
        let after = Cell::detect(raw);
        let before = self.apply_cell(col, row, after.clone());
        CellChange {
            col,
            row,
            before,
            after,
        }
    }

    /// Insert an all-empty row, shifting subsequent rows down
    pub fn insert_row(&mut self, at: usize) -> bool {
        let at = at.min(self.rows.len());
        let width = self.column_count();
        self.rows.insert(at, vec![None; width]);
        true
    }

    /// Delete a row; rejected (returns false) if it is the last one
    pub fn delete_row(&mut self, at: usize) -> bool {
        if self.rows.len() <= 1 {
            log::warn!("delete_row({}) rejected: grid must keep at least one row", at);
            return false;
        }
        if at >= self.rows.len() {
            return false;
        }
        self.rows.remove(at);
        true
    }

    /// Insert an empty column, shifting subsequent columns right
    pub fn insert_column(&mut self, at: usize) -> bool {
        for row in &mut self.rows {
            // Rows shorter than the insertion point stay sparse
            if at <= row.len() {
                row.insert(at, None);
            }
        }
        true
    }

    /// Delete a column; rejected (returns false) if it is the last one
    pub fn delete_column(&mut self, at: usize) -> bool {
        if self.column_count() <= 1 {
            log::warn!(
                "delete_column({}) rejected: grid must keep at least one column",
                at
            );
            return false;
        }
        if at >= self.column_count() {
            return false;
        }
        for row in &mut self.rows {
            if at < row.len() {
                row.remove(at);
            }
        }
        true
    }

    /// Reorder rows by a column's values, keeping leading frozen rows pinned
    ///
    /// Rows compare by coerced numeric value when the column holds at least
    /// one nonzero number, otherwise lexicographically by raw string. The
    /// sort is stable: ties keep their relative order.
    pub fn sort_by_column(&mut self, col: usize, ascending: bool, frozen_rows: usize) {
        let frozen = frozen_rows.min(self.rows.len());
        let body = &mut self.rows[frozen..];

        let numeric = body
            .iter()
            .any(|row| coerce_number(&row_value(row, col)) != 0.0);

        if numeric {
            body.sort_by(|a, b| {
                let ka = coerce_number(&row_value(a, col));
                let kb = coerce_number(&row_value(b, col));
                let ord = ka.partial_cmp(&kb).unwrap_or(Ordering::Equal);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        } else {
            body.sort_by(|a, b| {
                let ka = row_value(a, col).to_string();
                let kb = row_value(b, col).to_string();
                let ord = ka.cmp(&kb);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
    }

    /// Bounds of all non-empty cells as `(max_col, max_row)`, if any
    pub fn used_bounds(&self) -> Option<(usize, usize)> {
        let mut bounds = None;
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_some() {
                    let (max_col, max_row) = bounds.unwrap_or((col_idx, row_idx));
                    bounds = Some((max_col.max(col_idx), max_row.max(row_idx)));
                }
            }
        }
        bounds
    }

    /// Snapshot into the persisted document shape
    pub fn to_document(&self) -> SheetDocument {
        SheetDocument {
            data: self.rows.clone(),
        }
    }

    /// Build a grid from a persisted document
    pub fn from_document(doc: SheetDocument) -> Self {
        Self::from_rows(doc.data)
    }

    /// Serialize the current state to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Restore a grid from its JSON serialization
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SheetDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn row_value(row: &[Option<Cell>], col: usize) -> CellValue {
    row.get(col)
        .and_then(|c| c.as_ref())
        .map(|c| c.value.clone())
        .unwrap_or(CellValue::Null)
}

/// The persisted document shape: `{ "data": Row[][] }` with `null` for
/// empty cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    /// Row-major cell data
    pub data: Vec<Vec<Option<Cell>>>,
}
