//! Cell value and type model, plus input type detection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date formats accepted by the type detector, tried in order.
///
/// The raw input string is stored unchanged when it parses as a valid
/// calendar date; the formatter re-parses it at render time.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Represents the value stored in a cell
///
/// Untagged on the wire so the persisted document shape stays
/// `{ "value": 42 }` / `{ "value": "text" }` / `{ "value": null }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell (no value)
    Null,

    /// Boolean value (used only by checkbox cells)
    Bool(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// String value (text, dates, raw formula source)
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the value is empty
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(true) => Some(1.0),
            CellValue::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => {
                // Integers render without a trailing ".0"
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// The inferred type of a cell's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Plain text (also the type of empty cells)
    Text,
    /// Plain number
    Number,
    /// Number entered with a currency symbol
    Currency,
    /// Date stored as its original raw string
    Date,
    /// Boolean checkbox
    Checkbox,
    /// Formula (raw source kept in `Cell::formula`)
    Formula,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Text
    }
}

/// One grid position's content
///
/// Invariants: a cell with `value == Null` carries the default type, and
/// `formula` is `Some` if and only if `cell_type == Formula`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Stored value
    #[serde(default)]
    pub value: CellValue,
    /// Inferred type tag
    #[serde(rename = "type", default)]
    pub cell_type: CellType,
    /// Raw formula source, present only for formula cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Optional display hint (e.g. "currency")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Cell {
    /// Create a cell with a value and type, no formula or format hint
    pub fn new<V: Into<CellValue>>(value: V, cell_type: CellType) -> Self {
        Self {
            value: value.into(),
            cell_type,
            formula: None,
            format: None,
        }
    }

    /// Create a formula cell from its raw source (including the leading `=`)
    pub fn from_formula<S: Into<String>>(source: S) -> Self {
        let source = source.into();
        Self {
            value: CellValue::Text(source.clone()),
            cell_type: CellType::Formula,
            formula: Some(source),
            format: None,
        }
    }

    /// Set the display format hint
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Check if this cell carries a formula
    pub fn is_formula(&self) -> bool {
        self.cell_type == CellType::Formula
    }

    /// Classify raw user input into a typed cell
    ///
    /// Detection order matters: checkbox and formula prefixes are checked
    /// before numeric/currency/date patterns, since a formula may itself
    /// contain digits and must not be misclassified as a number.
    ///
    /// Empty or whitespace-only input yields `None` (a cleared cell).
    ///
    /// # Examples
    /// ```
    /// use plume_sheets_core::{Cell, CellType, CellValue};
    ///
    /// let cell = Cell::detect("$1,200.50").unwrap();
    /// assert_eq!(cell.value, CellValue::Number(1200.5));
    /// assert_eq!(cell.cell_type, CellType::Currency);
    ///
    /// let cell = Cell::detect("[x]").unwrap();
    /// assert_eq!(cell.value, CellValue::Bool(true));
    ///
    /// assert!(Cell::detect("   ").is_none());
    /// ```
    pub fn detect(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Checkbox literals
        match trimmed {
            "[]" | "[ ]" => return Some(Cell::new(false, CellType::Checkbox)),
            "[x]" | "[X]" => return Some(Cell::new(true, CellType::Checkbox)),
            _ => {}
        }

        // Formula: store the raw source, evaluation happens at display time
        if trimmed.starts_with('=') {
            return Some(Cell::from_formula(trimmed));
        }

        // Currency: a symbol followed by digits with optional separators
        if let Some(amount) = parse_currency(trimmed) {
            return Some(Cell::new(amount, CellType::Currency).with_format("currency"));
        }

        // Plain number (thousands separators stripped)
        if let Some(n) = parse_number(trimmed) {
            return Some(Cell::new(n, CellType::Number));
        }

        // Date: stored as the original string to preserve user formatting
        if is_valid_date(trimmed) {
            return Some(Cell::new(trimmed, CellType::Date));
        }

        Some(Cell::new(trimmed, CellType::Text))
    }
}

/// Parse a currency literal like `$1,200.50` / `€99` / `£3.14`
///
/// The grammar is a single currency symbol followed by `[0-9,]+` and an
/// optional `.`-separated fraction. Thousands separators are ignored.
fn parse_currency(s: &str) -> Option<f64> {
    let mut chars = s.chars();
    match chars.next() {
        Some('$') | Some('€') | Some('£') => {}
        _ => return None,
    }

    let rest = chars.as_str();
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    if !int_part.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let digits: String = s.chars().filter(|c| *c != ',').skip(1).collect();
    digits.parse().ok()
}

/// Parse a plain numeric literal, allowing thousands separators
fn parse_number(s: &str) -> Option<f64> {
    // Require at least one digit so "inf"/"NaN" stay text
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.replace(',', "").parse().ok()
}

/// Check whether the input parses as a valid calendar date
fn is_valid_date(s: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

/// Parse a stored date string using the detector's accepted formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
