//! # plume-sheets-core
//!
//! Core data structures for the plume-sheets grid engine.
//!
//! This crate provides the fundamental types used throughout plume-sheets:
//! - [`Cell`], [`CellValue`], [`CellType`] - cell content and input type detection
//! - [`CellRef`] and [`CellRange`] - A1-style addressing and ranges
//! - [`Grid`] - the two-dimensional cell store and its structural edits
//! - [`History`] - bounded undo/redo over single-cell edits
//! - [`Selection`] and [`ViewState`] - interaction and presentation state
//!
//! ## Example
//!
//! ```rust
//! use plume_sheets_core::{Grid, History, CellValue};
//!
//! let mut grid = Grid::new();
//! let mut history = History::new();
//!
//! history.push(grid.commit_input(0, 0, "$1,200.50"));
//! assert_eq!(grid.value(0, 0), CellValue::Number(1200.5));
//!
//! history.undo(&mut grid);
//! assert_eq!(grid.value(0, 0), CellValue::Null);
//! ```

pub mod cell;
pub mod coerce;
pub mod error;
pub mod grid;
pub mod history;
pub mod reference;
pub mod selection;
pub mod view;

// Re-exports for convenience
pub use cell::{parse_date, Cell, CellType, CellValue};
pub use coerce::{coerce_number, coerce_str};
pub use error::{Error, Result};
pub use grid::{CellChange, Grid, SheetDocument, DEFAULT_ROWS, MIN_COLUMNS};
pub use history::{History, DEFAULT_HISTORY_CAP};
pub use reference::{CellRange, CellRef};
pub use selection::{Selection, SelectionRect};
pub use view::{ViewState, DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
