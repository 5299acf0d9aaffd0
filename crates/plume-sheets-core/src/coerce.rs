//! Numeric coercion shared by aggregation, arithmetic, and sorting
//!
//! A cell's "numeric value" strips currency symbols and thousands separators
//! and parses as a float, defaulting to 0 on failure or emptiness. Every
//! consumer (SUM/AVERAGE/MIN/MAX, arithmetic substitution, column sort) goes
//! through this one function so aggregates stay consistent.

use crate::cell::CellValue;

/// Coerce a cell value to a number, defaulting to 0.0
pub fn coerce_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Null => 0.0,
        CellValue::Number(n) => *n,
        CellValue::Bool(true) => 1.0,
        CellValue::Bool(false) => 0.0,
        CellValue::Text(s) => coerce_str(s),
    }
}

/// Coerce a display string to a number, defaulting to 0.0
///
/// Currency symbols and thousands separators are stripped before parsing.
pub fn coerce_str(s: &str) -> f64 {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();
    cleaned.parse().unwrap_or(0.0)
}
