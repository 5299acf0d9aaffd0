//! Cell reference and range types
//!
//! References use A1-style notation: column letters in bijective base-26
//! (A=0, Z=25, AA=26, ...) followed by a 1-based row number.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A zero-based (column, row) grid coordinate parsed from an A1-style label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Column index (0-based, A=0, B=1, ...)
    pub col: usize,
    /// Row index (0-based internally, 1-based in display)
    pub row: usize,
}

impl CellRef {
    /// Create a new cell reference
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Parse a reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use plume_sheets_core::CellRef;
    ///
    /// let r = CellRef::parse("A1").unwrap();
    /// assert_eq!((r.col, r.row), (0, 0));
    ///
    /// let r = CellRef::parse("AA10").unwrap();
    /// assert_eq!((r.col, r.row), (26, 9));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty reference".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..pos])?;

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReference(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: usize = row_str
            .parse()
            .map_err(|_| Error::InvalidReference(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in display, 0-based internally
        if row == 0 {
            return Err(Error::InvalidReference(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self {
            col,
            row: row - 1,
        })
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, ...)
    ///
    /// Bijective base-26: there is no "zero" digit, so each letter
    /// contributes `code + 1` before the final zero-basing.
    pub fn letters_to_column(letters: &str) -> Result<usize> {
        if letters.is_empty() {
            return Err(Error::InvalidReference("empty column letters".into()));
        }

        let mut col: usize = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidReference(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            let digit = c.to_ascii_uppercase() as usize - 'A' as usize + 1;
            col = col
                .checked_mul(26)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| {
                    Error::InvalidReference(format!("column letters '{}' out of range", letters))
                })?;
        }

        Ok(col - 1)
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, ...)
    pub fn column_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Format as an A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells named by two corner references
///
/// Corners are normalized on construction so `start` is the top-left and
/// `end` the bottom-right regardless of which corner was given first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellRef,
    /// Bottom-right corner
    pub end: CellRef,
}

impl CellRange {
    /// Create a new range, normalizing min/max on both axes
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// Create a single-cell range
    pub fn single(r: CellRef) -> Self {
        Self { start: r, end: r }
    }

    /// Parse a range from `A1:B3` notation
    ///
    /// Exactly one `:` separating two valid references is required.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut parts = s.split(':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => Ok(Self::new(CellRef::parse(a)?, CellRef::parse(b)?)),
            _ => Err(Error::InvalidRange(format!(
                "expected 'A1:B3' style range, got '{}'",
                s
            ))),
        }
    }

    /// Check if a coordinate falls within this range
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col >= self.start.col && col <= self.end.col && row >= self.start.row && row <= self.end.row
    }

    /// Number of rows spanned
    pub fn row_count(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Number of columns spanned
    pub fn col_count(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Iterate every coordinate in the rectangle, row by row
    ///
    /// The order is stable (row-major) so aggregations over the range are
    /// deterministic.
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_col: self.start.col,
            current_row: self.start.row,
            done: false,
        }
    }

    /// Format as an `A1:B3` string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over coordinates in a range (row-major)
pub struct CellRangeIterator {
    range: CellRange,
    current_col: usize,
    current_row: usize,
    done: bool,
}

impl Iterator for CellRangeIterator {
    type Item = CellRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let r = CellRef::new(self.current_col, self.current_row);

        if self.current_col < self.range.end.col {
            self.current_col += 1;
        } else if self.current_row < self.range.end.row {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.done = true;
        }

        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.range.row_count() * self.range.col_count();
        let consumed = if self.done {
            total
        } else {
            (self.current_row - self.range.start.row) * self.range.col_count()
                + (self.current_col - self.range.start.col)
        };
        (total - consumed, Some(total - consumed))
    }
}

impl ExactSizeIterator for CellRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellRef::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellRef::letters_to_column("B").unwrap(), 1);
        assert_eq!(CellRef::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellRef::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellRef::letters_to_column("AB").unwrap(), 27);
        assert_eq!(CellRef::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(CellRef::letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(CellRef::letters_to_column("aa").unwrap(), 26);
    }

    #[test]
    fn test_letters_to_column_overflow_is_an_error() {
        // Labels this long cannot be accumulated in a usize; they must
        // fail as invalid references rather than wrap or panic.
        assert!(CellRef::letters_to_column("ZZZZZZZZZZZZZZ").is_err());
        assert!(CellRef::letters_to_column(&"Z".repeat(100)).is_err());
        assert!(CellRef::parse("ZZZZZZZZZZZZZZ1").is_err());
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellRef::column_to_letters(0), "A");
        assert_eq!(CellRef::column_to_letters(25), "Z");
        assert_eq!(CellRef::column_to_letters(26), "AA");
        assert_eq!(CellRef::column_to_letters(701), "ZZ");
        assert_eq!(CellRef::column_to_letters(702), "AAA");
    }

    #[test]
    fn test_parse() {
        let r = CellRef::parse("A1").unwrap();
        assert_eq!((r.col, r.row), (0, 0));

        let r = CellRef::parse("B7").unwrap();
        assert_eq!((r.col, r.row), (1, 6));

        let r = CellRef::parse("AA10").unwrap();
        assert_eq!((r.col, r.row), (26, 9));
    }

    #[test]
    fn test_parse_errors() {
        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("A").is_err());
        assert!(CellRef::parse("1").is_err());
        assert!(CellRef::parse("A0").is_err());
        assert!(CellRef::parse("A1B").is_err());
        assert!(CellRef::parse("A-1").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for label in ["A1", "Z99", "AA10", "AZ1", "BA100"] {
            assert_eq!(CellRef::parse(label).unwrap().to_string(), label);
        }
    }

    #[test]
    fn test_range_parse_normalizes_corners() {
        let forward = CellRange::parse("A1:B2").unwrap();
        let backward = CellRange::parse("B2:A1").unwrap();
        assert_eq!(forward, backward);

        let coords: Vec<_> = forward.cells().map(|r| (r.col, r.row)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_range_parse_errors() {
        assert!(CellRange::parse("A1").is_err());
        assert!(CellRange::parse("A1:B2:C3").is_err());
        assert!(CellRange::parse("A1:").is_err());
        assert!(CellRange::parse(":B2").is_err());
    }

    #[test]
    fn test_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();
        assert!(range.contains(1, 1));
        assert!(range.contains(3, 3));
        assert!(range.contains(2, 2));
        assert!(!range.contains(0, 0));
        assert!(!range.contains(1, 4));
    }

    #[test]
    fn test_single_cell_range_iterator() {
        let range = CellRange::single(CellRef::new(2, 3));
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells, vec![CellRef::new(2, 3)]);
    }

    proptest! {
        /// Round-trip: parse(format(ref)) == ref for arbitrary coordinates
        #[test]
        fn prop_ref_roundtrip(col in 0usize..2000, row in 0usize..100_000) {
            let r = CellRef::new(col, row);
            let parsed = CellRef::parse(&r.to_a1_string()).unwrap();
            prop_assert_eq!(parsed, r);
        }
    }
}
