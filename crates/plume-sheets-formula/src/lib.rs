//! # plume-sheets-formula
//!
//! Formula evaluation and display formatting for the plume-sheets engine.
//!
//! The formula vocabulary is intentionally small: range aggregates,
//! a single-comparison `IF`, `CONCAT`, `TODAY`, bare cell references, and
//! plain arithmetic. Evaluation is total; failures surface as the `#ERROR`
//! display value rather than as errors.
//!
//! ## Example
//!
//! ```rust
//! use plume_sheets_core::Grid;
//! use plume_sheets_formula::{evaluate, format_cell, EvalValue};
//!
//! let mut grid = Grid::new();
//! grid.commit_input(0, 0, "1200");
//! grid.commit_input(0, 1, "=A1*2");
//!
//! assert_eq!(evaluate("=A1*2", &grid), EvalValue::Number(2400.0));
//! assert_eq!(format_cell(grid.cell(0, 1), &grid), "2,400");
//! ```

pub mod display;
pub mod error;
pub mod eval;

pub use display::{format_cell, group_thousands, CHECKED_GLYPH, UNCHECKED_GLYPH};
pub use error::{FormulaError, FormulaResult};
pub use eval::{evaluate, EvalValue, ERROR_MARKER};
