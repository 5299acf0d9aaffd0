//! # plume-sheets
//!
//! The spreadsheet grid and formula engine behind lightweight sheet
//! documents: typed cell input, A1-style references, a small fixed formula
//! vocabulary, bounded undo/redo, rectangular selection, structural grid
//! edits, JSON persistence, and delimited export.
//!
//! The engine is a pure library: rendering, persistence scheduling, and
//! all chrome live in the hosting application, which drives the
//! [`SheetEditor`] with edit intents and reads back display strings.
//!
//! ## Example
//!
//! ```rust
//! use plume_sheets::prelude::*;
//!
//! let mut editor = SheetEditor::new();
//! editor.commit_cell(0, 0, "Price");
//! editor.commit_cell(0, 1, "$1,200.50");
//! editor.commit_cell(0, 2, "=A2*2");
//!
//! assert_eq!(editor.display_value(0, 1), "$1,200.5");
//! assert_eq!(editor.display_value(0, 2), "2,401");
//!
//! editor.undo();
//! assert_eq!(editor.display_value(0, 2), "");
//! ```

pub mod editor;
pub mod prelude;

pub use editor::SheetEditor;

// Re-export core types
pub use plume_sheets_core::{
    coerce_number, coerce_str, parse_date, Cell, CellChange, CellRange, CellRef, CellType,
    CellValue, Error, Grid, History, Result, Selection, SelectionRect, SheetDocument, ViewState,
    DEFAULT_COLUMN_WIDTH, DEFAULT_HISTORY_CAP, DEFAULT_ROWS, MIN_COLUMNS, MIN_COLUMN_WIDTH,
};

// Re-export formula types
pub use plume_sheets_formula::{
    evaluate, format_cell, group_thousands, EvalValue, FormulaError, FormulaResult, ERROR_MARKER,
    CHECKED_GLYPH, UNCHECKED_GLYPH,
};

// Re-export CSV types
pub use plume_sheets_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter, LineTerminator,
};
