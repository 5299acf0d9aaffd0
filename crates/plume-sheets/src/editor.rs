//! The sheet editor: grid, history, selection, and view state wired
//! together behind the edit-intent surface the UI layer consumes
//!
//! The editor is single-threaded and synchronous; every operation
//! completes before returning. Persistence is an external concern: the
//! editor exposes its serialized state on demand and keeps no timers or
//! save status.

use plume_sheets_core::{
    CellValue, Grid, History, Result, Selection, SelectionRect, ViewState,
};
use plume_sheets_csv::{CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter};
use plume_sheets_formula::format_cell;

/// Owns a sheet document's full editing state
///
/// Reads flow grid → evaluator → formatter; writes flow through the
/// history so every committed cell edit is undoable. Structural edits
/// (insert/delete/sort) are not recorded in the history.
#[derive(Debug, Default)]
pub struct SheetEditor {
    grid: Grid,
    history: History,
    selection: Selection,
    view: ViewState,
}

impl SheetEditor {
    /// Create an editor over the default empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor from a persisted JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            grid: Grid::from_json(json)?,
            ..Self::default()
        })
    }

    /// Serialize the current grid state to JSON
    pub fn to_json(&self) -> Result<String> {
        self.grid.to_json()
    }

    /// Read access to the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read access to the view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    /// The (column, row) extent of populated cells, for sizing the
    /// viewport's scroll range; `None` when every cell is empty
    pub fn used_bounds(&self) -> Option<(usize, usize)> {
        self.grid.used_bounds()
    }

    // === Cell edits ===

    /// Commit raw input at a position, recording the change for undo
    pub fn commit_cell(&mut self, col: usize, row: usize, raw: &str) {
        let change = self.grid.commit_input(col, row, raw);
        self.history.push(change);
    }

    /// Undo the most recent cell edit; false if there was none
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.grid)
    }

    /// Redo the most recently undone cell edit; false if there was none
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.grid)
    }

    /// Whether an undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // === Read queries ===

    /// The string to populate the cell editor with: formula source for
    /// formula cells, otherwise the stored value
    pub fn raw_value(&self, col: usize, row: usize) -> String {
        match self.grid.cell(col, row) {
            Some(cell) => cell
                .formula
                .clone()
                .unwrap_or_else(|| cell.value.to_string()),
            None => String::new(),
        }
    }

    /// The cell's stored value
    pub fn value(&self, col: usize, row: usize) -> CellValue {
        self.grid.value(col, row)
    }

    /// The cell's rendered display string (formulas evaluated)
    pub fn display_value(&self, col: usize, row: usize) -> String {
        format_cell(self.grid.cell(col, row), &self.grid)
    }

    // === Structural edits ===

    /// Insert an empty row; always succeeds
    pub fn insert_row(&mut self, at: usize) -> bool {
        self.grid.insert_row(at)
    }

    /// Delete a row; rejected for the last remaining row
    pub fn delete_row(&mut self, at: usize) -> bool {
        self.grid.delete_row(at)
    }

    /// Insert an empty column; always succeeds
    pub fn insert_column(&mut self, at: usize) -> bool {
        self.grid.insert_column(at)
    }

    /// Delete a column; rejected for the last remaining column
    pub fn delete_column(&mut self, at: usize) -> bool {
        self.grid.delete_column(at)
    }

    /// Sort rows by a column, keeping frozen header rows pinned
    pub fn sort_by_column(&mut self, col: usize, ascending: bool) {
        self.grid
            .sort_by_column(col, ascending, self.view.frozen_rows());
    }

    // === View state ===

    /// Resize a column (clamped to the minimum width)
    pub fn resize_column(&mut self, col: usize, width: f64) {
        self.view.set_column_width(col, width);
    }

    /// Hide a column
    pub fn hide_column(&mut self, col: usize) {
        self.view.hide_column(col);
    }

    /// Show a previously hidden column
    pub fn show_column(&mut self, col: usize) {
        self.view.show_column(col);
    }

    /// Set the frozen-row boundary
    pub fn set_frozen_rows(&mut self, count: usize) {
        self.view.set_frozen_rows(count);
    }

    /// Set the frozen-column boundary
    pub fn set_frozen_cols(&mut self, count: usize) {
        self.view.set_frozen_cols(count);
    }

    // === Selection ===

    /// Begin a selection at a cell (mouse down)
    pub fn start_selection(&mut self, col: usize, row: usize) {
        self.selection.start(col, row);
    }

    /// Extend the selection to a cell (drag)
    pub fn extend_selection(&mut self, col: usize, row: usize) {
        self.selection.extend(col, row);
    }

    /// Whether a coordinate is inside the current selection
    pub fn selection_contains(&self, col: usize, row: usize) -> bool {
        self.selection.contains(col, row)
    }

    /// The focused cell (the selection anchor)
    pub fn active_cell(&self) -> (usize, usize) {
        self.selection.active_cell()
    }

    /// The normalized selection rectangle
    pub fn selection_rect(&self) -> SelectionRect {
        self.selection.rect()
    }

    // === Import/export ===

    /// Export the grid as comma-delimited text
    pub fn export_csv(&self) -> CsvResult<String> {
        CsvWriter::write_string(&self.grid, &CsvWriteOptions::default())
    }

    /// Replace the grid with one read from delimited text
    pub fn import_csv(&mut self, input: &str) -> CsvResult<()> {
        self.grid = CsvReader::read_str(input, &CsvReadOptions::default())?;
        self.history = History::new();
        self.selection = Selection::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_and_display() {
        let mut editor = SheetEditor::new();
        editor.commit_cell(0, 0, "1200");
        editor.commit_cell(0, 1, "=A1*2");

        assert_eq!(editor.display_value(0, 0), "1,200");
        assert_eq!(editor.display_value(0, 1), "2,400");
        assert_eq!(editor.raw_value(0, 1), "=A1*2");
    }

    #[test]
    fn test_used_bounds_tracks_populated_extent() {
        let mut editor = SheetEditor::new();
        assert_eq!(editor.used_bounds(), None);

        editor.commit_cell(4, 2, "x");
        assert_eq!(editor.used_bounds(), Some((4, 2)));
    }

    #[test]
    fn test_import_resets_history() {
        let mut editor = SheetEditor::new();
        editor.commit_cell(0, 0, "x");
        assert!(editor.can_undo());

        editor.import_csv("a,b\nc,d").unwrap();
        assert!(!editor.can_undo());
        assert_eq!(editor.value(1, 1), CellValue::text("d"));
    }
}
