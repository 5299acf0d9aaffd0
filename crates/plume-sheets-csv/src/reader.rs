//! Delimited import

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use plume_sheets_core::{Cell, CellType, Grid};

/// Delimited-text reader producing a grid
pub struct CsvReader;

impl CsvReader {
    /// Read delimited input into a grid, one row per record
    ///
    /// With `auto_detect_types` each field goes through the input type
    /// detector, so `"42"` becomes a number cell and `"[x]"` a checkbox;
    /// otherwise every non-empty field is stored as text. Empty fields
    /// become empty cells.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: Vec<Option<Cell>> = record
                .iter()
                .map(|field| {
                    if options.auto_detect_types {
                        Cell::detect(field)
                    } else if field.trim().is_empty() {
                        None
                    } else {
                        Some(Cell::new(field, CellType::Text))
                    }
                })
                .collect();
            rows.push(row);
        }

        Ok(Grid::from_rows(rows))
    }

    /// Read a delimited string into a grid
    pub fn read_str(input: &str, options: &CsvReadOptions) -> CsvResult<Grid> {
        Self::read(input.as_bytes(), options)
    }

    /// Read a delimited file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), options)
    }
}
