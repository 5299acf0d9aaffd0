//! # plume-sheets-csv
//!
//! Delimited import/export for the plume-sheets engine.

pub mod error;
pub mod options;
pub mod reader;
pub mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
