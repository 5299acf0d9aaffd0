//! Error types for plume-sheets-formula
//!
//! These errors stay internal to the evaluator: the public
//! [`evaluate`](crate::evaluate) surface is total and maps every failure to
//! the `#ERROR` sentinel value.

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing or evaluating a formula
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Malformed formula text
    #[error("Formula parse error: {0}")]
    Parse(String),

    /// Evaluation failure (unsafe characters, bad arity, non-finite result)
    #[error("Formula evaluation error: {0}")]
    Evaluation(String),
}
