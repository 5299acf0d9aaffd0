//! Delimited export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use plume_sheets_core::Grid;

/// Delimited-text writer over a grid
pub struct CsvWriter;

impl CsvWriter {
    /// Write every grid row to a writer, one record per row
    ///
    /// Records are rectangular: each row is padded with empty fields up to
    /// the grid's column count, matching the sparse-row semantics. Fields
    /// carry the cell's raw stored value (formula source included).
    /// Quoting is RFC-4180 style: fields containing the delimiter, the
    /// quote character, or a newline are quoted, with embedded quotes
    /// doubled.
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        let cols = grid.column_count();
        for row in 0..grid.row_count() {
            let record: Vec<String> = (0..cols)
                .map(|col| grid.value(col, row).to_string())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Export the grid as a delimited string
    pub fn write_string(grid: &Grid, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(grid, &mut buf, options)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Export the grid to a file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(grid, BufWriter::new(file), options)
    }
}
