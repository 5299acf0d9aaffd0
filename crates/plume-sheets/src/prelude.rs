//! Prelude module - common imports for plume-sheets users
//!
//! ```rust
//! use plume_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellChange,
    CellRange,
    CellRef,
    CellType,
    CellValue,

    // CSV types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Formula types
    EvalValue,

    // Error types
    Error,
    Result,

    // Main types
    Grid,
    History,
    Selection,
    SelectionRect,
    SheetDocument,
    SheetEditor,
    ViewState,
};

pub use crate::{evaluate, format_cell};

pub use crate::{
    CHECKED_GLYPH, DEFAULT_COLUMN_WIDTH, DEFAULT_HISTORY_CAP, ERROR_MARKER, MIN_COLUMNS,
    MIN_COLUMN_WIDTH, UNCHECKED_GLYPH,
};
