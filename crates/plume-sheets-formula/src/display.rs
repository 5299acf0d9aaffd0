//! Display formatting for rendered cells
//!
//! Formatting runs on every render, so it is pure: evaluating a formula
//! for display never mutates the grid, and formatting the same cell twice
//! yields identical strings.

use crate::eval::{evaluate, EvalValue};
use plume_sheets_core::{parse_date, Cell, CellType, CellValue, Grid};

/// Glyph for a checked checkbox cell
pub const CHECKED_GLYPH: &str = "☑";

/// Glyph for an unchecked checkbox cell
pub const UNCHECKED_GLYPH: &str = "☐";

const CURRENCY_SYMBOL: &str = "$";
const DATE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

/// Render a cell's computed value as its display string
///
/// Empty cells render as the empty string; formulas are evaluated against
/// the grid; currency and plain numbers get thousands grouping; dates are
/// re-rendered from their stored raw string.
pub fn format_cell(cell: Option<&Cell>, grid: &Grid) -> String {
    let cell = match cell {
        Some(c) => c,
        None => return String::new(),
    };

    match &cell.value {
        CellValue::Null => String::new(),
        CellValue::Bool(b) => {
            if *b {
                CHECKED_GLYPH.to_string()
            } else {
                UNCHECKED_GLYPH.to_string()
            }
        }
        CellValue::Text(s) if cell.is_formula() || s.starts_with('=') => {
            let source = cell.formula.as_deref().unwrap_or(s);
            format_eval_result(evaluate(source, grid), cell)
        }
        CellValue::Number(n) if cell.cell_type == CellType::Currency => {
            format!("{}{}", CURRENCY_SYMBOL, group_thousands(*n))
        }
        CellValue::Text(s) if cell.cell_type == CellType::Date => match parse_date(s) {
            Some(date) => date.format(DATE_DISPLAY_FORMAT).to_string(),
            None => s.clone(),
        },
        CellValue::Number(n) => group_thousands(*n),
        other => other.to_string(),
    }
}

fn format_eval_result(result: EvalValue, cell: &Cell) -> String {
    match result.as_number() {
        Some(n) => {
            let grouped = group_thousands(n);
            if cell.format.as_deref() == Some("currency") {
                format!("{}{}", CURRENCY_SYMBOL, grouped)
            } else {
                grouped
            }
        }
        None => result.to_string(),
    }
}

/// Format a number with locale-style thousands grouping
///
/// Matches `toLocaleString` defaults: commas every three integer digits,
/// at most three fraction digits, no trailing zeros.
pub fn group_thousands(n: f64) -> String {
    let negative = n < 0.0;
    let formatted = format!("{:.3}", n.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, ""));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push_str(&grouped);
    if !frac.is_empty() {
        result.push('.');
        result.push_str(frac);
    }
    result
}
