//! Formula evaluator
//!
//! Given a formula string and the grid, computes a scalar result. The
//! formula vocabulary is small and fixed: `TODAY`, the range aggregates
//! (`SUM`/`AVERAGE`/`AVG`/`COUNT`/`MIN`/`MAX`), a single-comparison `IF`,
//! `CONCAT`, bare cell references, and plain arithmetic over substituted
//! references.
//!
//! Evaluation is pure with respect to the grid and total: malformed input
//! yields the [`ERROR_MARKER`] value, never a panic or an error to the
//! caller.

use crate::error::{FormulaError, FormulaResult};
use chrono::Local;
use lazy_regex::regex;
use plume_sheets_core::{coerce_number, coerce_str, CellRange, CellRef, CellValue, Grid};
use regex::Captures;
use std::fmt;

/// Sentinel displayed for any formula that fails to parse or evaluate
pub const ERROR_MARKER: &str = "#ERROR";

/// Result of evaluating a formula
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    /// No value
    Null,
    /// Boolean result
    Bool(bool),
    /// Numeric result
    Number(f64),
    /// String result
    Text(String),
    /// Evaluation failure, displayed as `#ERROR`
    Error,
}

impl EvalValue {
    /// Numeric view of the result, if it is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EvalValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is the error marker
    pub fn is_error(&self) -> bool {
        matches!(self, EvalValue::Error)
    }
}

impl fmt::Display for EvalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalValue::Null => write!(f, ""),
            EvalValue::Bool(b) => write!(f, "{}", b),
            EvalValue::Number(n) => write!(f, "{}", format_number(*n)),
            EvalValue::Text(s) => write!(f, "{}", s),
            EvalValue::Error => write!(f, "{}", ERROR_MARKER),
        }
    }
}

impl From<CellValue> for EvalValue {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => EvalValue::Null,
            CellValue::Bool(b) => EvalValue::Bool(b),
            CellValue::Number(n) => EvalValue::Number(n),
            CellValue::Text(s) => EvalValue::Text(s),
        }
    }
}

/// Range aggregation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggKind {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

/// The recognized formula shapes, tried in fixed precedence order
#[derive(Debug, PartialEq)]
enum FormulaKind<'a> {
    Today,
    Aggregate(AggKind, &'a str),
    If(&'a str),
    Concat(&'a str),
    Reference(&'a str),
    Arithmetic(&'a str),
}

/// Classify a formula body (leading `=` already stripped)
fn classify(body: &str) -> FormulaKind<'_> {
    if regex!(r"^TODAY\(\s*\)$"i).is_match(body) {
        return FormulaKind::Today;
    }

    if let Some(caps) = regex!(r"^(SUM|AVERAGE|AVG|COUNT|MIN|MAX)\((.*)\)$"i).captures(body) {
        let kind = match caps[1].to_ascii_uppercase().as_str() {
            "SUM" => AggKind::Sum,
            "AVERAGE" | "AVG" => AggKind::Average,
            "COUNT" => AggKind::Count,
            "MIN" => AggKind::Min,
            _ => AggKind::Max,
        };
        return FormulaKind::Aggregate(kind, caps.get(2).unwrap().as_str());
    }

    if let Some(caps) = regex!(r"^IF\((.*)\)$"i).captures(body) {
        return FormulaKind::If(caps.get(1).unwrap().as_str());
    }

    if let Some(caps) = regex!(r"^CONCAT\((.*)\)$"i).captures(body) {
        return FormulaKind::Concat(caps.get(1).unwrap().as_str());
    }

    if regex!(r"^[A-Za-z]+[0-9]+$").is_match(body) {
        return FormulaKind::Reference(body);
    }

    FormulaKind::Arithmetic(body)
}

/// Evaluate a formula against the grid
///
/// Accepts the raw source with or without the leading `=`. Never panics
/// and never returns an error to the caller; failures come back as
/// [`EvalValue::Error`].
///
/// # Examples
/// ```
/// use plume_sheets_core::Grid;
/// use plume_sheets_formula::{evaluate, EvalValue};
///
/// let mut grid = Grid::new();
/// grid.commit_input(0, 0, "1");
/// grid.commit_input(0, 1, "2");
///
/// assert_eq!(evaluate("=SUM(A1:A2)", &grid), EvalValue::Number(3.0));
/// assert_eq!(evaluate("=A1+A2*2", &grid), EvalValue::Number(5.0));
/// ```
pub fn evaluate(formula: &str, grid: &Grid) -> EvalValue {
    let body = formula.trim();
    let body = body.strip_prefix('=').unwrap_or(body).trim();
    if body.is_empty() {
        return EvalValue::Error;
    }

    match classify(body) {
        FormulaKind::Today => {
            EvalValue::Text(Local::now().date_naive().format("%-m/%-d/%Y").to_string())
        }
        FormulaKind::Aggregate(kind, arg) => eval_aggregate(kind, arg, grid),
        FormulaKind::If(args) => eval_if(args, grid).unwrap_or(EvalValue::Error),
        FormulaKind::Concat(args) => eval_concat(args, grid),
        FormulaKind::Reference(label) => eval_reference(label, grid),
        FormulaKind::Arithmetic(expr) => match eval_arithmetic(expr, grid) {
            Ok(n) => EvalValue::Number(n),
            Err(e) => {
                log::debug!("formula '{}' failed: {}", formula, e);
                EvalValue::Error
            }
        },
    }
}

fn eval_aggregate(kind: AggKind, arg: &str, grid: &Grid) -> EvalValue {
    // An unparseable range resolves to no coordinates, so aggregates
    // degrade to 0 rather than erroring (unresolved references are 0).
    let coords: Vec<CellRef> = CellRange::parse(arg)
        .map(|r| r.cells().collect())
        .unwrap_or_default();

    let number = |r: &CellRef| coerce_number(&grid.value(r.col, r.row));

    let result = match kind {
        AggKind::Sum => coords.iter().map(number).sum(),
        AggKind::Average => {
            if coords.is_empty() {
                0.0
            } else {
                coords.iter().map(number).sum::<f64>() / coords.len() as f64
            }
        }
        AggKind::Count => coords
            .iter()
            .filter(|r| !grid.value(r.col, r.row).is_null())
            .count() as f64,
        AggKind::Min => coords.iter().map(number).fold(f64::INFINITY, f64::min),
        AggKind::Max => coords.iter().map(number).fold(f64::NEG_INFINITY, f64::max),
    };

    if result.is_finite() {
        EvalValue::Number(result)
    } else {
        // MIN/MAX over an empty coordinate list
        EvalValue::Number(0.0)
    }
}

/// Binary comparison operators accepted in `IF` conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Ge,
    Le,
    Ne,
    Gt,
    Lt,
    Eq,
}

fn eval_if(args_src: &str, grid: &Grid) -> FormulaResult<EvalValue> {
    let args = split_args(args_src);
    if args.len() != 3 {
        return Err(FormulaError::Parse(format!(
            "IF expects 3 arguments, got {}",
            args.len()
        )));
    }

    let branch = if eval_condition(args[0], grid)? {
        args[1]
    } else {
        args[2]
    };
    Ok(resolve_term(branch, grid))
}

fn eval_condition(cond: &str, grid: &Grid) -> FormulaResult<bool> {
    let (op, lhs, rhs) = split_condition(cond)?;
    let lv = resolve_term(lhs, grid);
    let rv = resolve_term(rhs, grid);

    let num = |v: &EvalValue| match v {
        EvalValue::Number(n) => *n,
        EvalValue::Bool(true) => 1.0,
        EvalValue::Bool(false) => 0.0,
        EvalValue::Text(s) => coerce_str(s),
        _ => 0.0,
    };

    Ok(match op {
        CmpOp::Gt => num(&lv) > num(&rv),
        CmpOp::Lt => num(&lv) < num(&rv),
        CmpOp::Ge => num(&lv) >= num(&rv),
        CmpOp::Le => num(&lv) <= num(&rv),
        // Equality compares strings when both sides are strings
        CmpOp::Eq => match (&lv, &rv) {
            (EvalValue::Text(a), EvalValue::Text(b)) => a == b,
            _ => num(&lv) == num(&rv),
        },
        CmpOp::Ne => match (&lv, &rv) {
            (EvalValue::Text(a), EvalValue::Text(b)) => a != b,
            _ => num(&lv) != num(&rv),
        },
    })
}

/// Find the single top-level comparison operator in a condition
///
/// Two-character operators are checked first so `>=` is not read as `>`.
/// Operators inside quoted strings are skipped.
fn split_condition(cond: &str) -> FormulaResult<(CmpOp, &str, &str)> {
    let bytes = cond.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c == b'"' {
            in_quotes = !in_quotes;
            i += 1;
            continue;
        }
        if in_quotes {
            i += 1;
            continue;
        }

        // `get` avoids panicking on a slice through a multi-byte character
        let two = cond.get(i..i + 2).unwrap_or("");
        let op = match two {
            ">=" => Some((CmpOp::Ge, 2)),
            "<=" => Some((CmpOp::Le, 2)),
            "!=" | "<>" => Some((CmpOp::Ne, 2)),
            _ => match c {
                b'>' => Some((CmpOp::Gt, 1)),
                b'<' => Some((CmpOp::Lt, 1)),
                b'=' => Some((CmpOp::Eq, 1)),
                _ => None,
            },
        };

        if let Some((op, len)) = op {
            return Ok((op, &cond[..i], &cond[i + len..]));
        }
        i += 1;
    }

    Err(FormulaError::Parse(format!(
        "no comparison operator in '{}'",
        cond
    )))
}

fn eval_concat(args_src: &str, grid: &Grid) -> EvalValue {
    let mut result = String::new();
    for arg in split_args(args_src) {
        result.push_str(&resolve_term(arg, grid).to_string());
    }
    EvalValue::Text(result)
}

fn eval_reference(label: &str, grid: &Grid) -> EvalValue {
    match CellRef::parse(label) {
        Ok(r) => {
            let value = grid.value(r.col, r.row);
            if value.is_null() {
                // Absent cells read as 0
                EvalValue::Number(0.0)
            } else {
                value.into()
            }
        }
        Err(_) => EvalValue::Number(0.0),
    }
}

/// Resolve an operand: quoted string literal, numeric literal, cell
/// reference (to the referenced cell's raw value), or bare text
fn resolve_term(term: &str, grid: &Grid) -> EvalValue {
    let t = term.trim();

    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        return EvalValue::Text(t[1..t.len() - 1].to_string());
    }
    if let Ok(n) = t.parse::<f64>() {
        return EvalValue::Number(n);
    }
    if regex!(r"^[A-Za-z]+[0-9]+$").is_match(t) {
        if let Ok(r) = CellRef::parse(t) {
            return grid.value(r.col, r.row).into();
        }
    }
    EvalValue::Text(t.to_string())
}

/// Split an argument list on top-level commas only
///
/// Commas inside nested parentheses or quoted strings do not split.
fn split_args(s: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth -= 1,
            ',' if !in_quotes && depth == 0 => {
                args.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(s[start..].trim());
    args
}

fn eval_arithmetic(expr: &str, grid: &Grid) -> FormulaResult<f64> {
    // Substitute cell references with their coerced numeric values
    let substituted = regex!(r"[A-Za-z]+[0-9]+").replace_all(expr, |caps: &Captures| {
        let n = CellRef::parse(&caps[0])
            .map(|r| coerce_number(&grid.value(r.col, r.row)))
            .unwrap_or(0.0);
        format_number(n)
    });

    // Strict allowlist before evaluating anything
    if !regex!(r"^[0-9\s+\-*/().]+$").is_match(&substituted) {
        return Err(FormulaError::Evaluation(format!(
            "unsafe expression '{}'",
            substituted
        )));
    }

    let mut parser = ArithParser::new(&substituted);
    let value = parser.parse()?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::Evaluation("non-finite result".into()))
    }
}

/// Format a number without a trailing `.0` for integral values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Minimal recursive descent parser for `+ - * / ( )` arithmetic
struct ArithParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ArithParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> FormulaResult<f64> {
        let value = self.expression()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(FormulaError::Parse(format!(
                "unexpected characters after expression: '{}'",
                &self.input[self.pos..]
            )));
        }
        Ok(value)
    }

    fn expression(&mut self) -> FormulaResult<f64> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> FormulaResult<f64> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> FormulaResult<f64> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(FormulaError::Parse("unclosed parenthesis".into()));
                }
                self.pos += 1;
                Ok(value)
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> FormulaResult<f64> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(FormulaError::Parse(format!(
                "expected number at position {}",
                start
            )));
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| FormulaError::Parse(format!("bad number '{}'", &self.input[start..self.pos])))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid_with(values: &[(usize, usize, &str)]) -> Grid {
        let mut grid = Grid::new();
        for (col, row, raw) in values {
            grid.commit_input(*col, *row, raw);
        }
        grid
    }

    #[test]
    fn test_sum_coerces_non_numeric_to_zero() {
        let grid = grid_with(&[(0, 0, "1"), (0, 1, "2"), (0, 2, "x")]);
        assert_eq!(evaluate("=SUM(A1:A3)", &grid), EvalValue::Number(3.0));
    }

    #[test]
    fn test_sum_over_missing_cells() {
        let grid = Grid::new();
        assert_eq!(evaluate("=SUM(A1:C3)", &grid), EvalValue::Number(0.0));
    }

    #[test]
    fn test_sum_unparseable_range_is_zero() {
        let grid = Grid::new();
        assert_eq!(evaluate("=SUM(garbage)", &grid), EvalValue::Number(0.0));
    }

    #[test]
    fn test_average() {
        let grid = grid_with(&[(0, 0, "2"), (0, 1, "4")]);
        assert_eq!(evaluate("=AVERAGE(A1:A2)", &grid), EvalValue::Number(3.0));
        assert_eq!(evaluate("=AVG(A1:A2)", &grid), EvalValue::Number(3.0));

        // Empty cells still count toward the divisor
        assert_eq!(evaluate("=average(A1:A3)", &grid), EvalValue::Number(2.0));
    }

    #[test]
    fn test_count() {
        let grid = grid_with(&[(0, 0, "1"), (0, 2, "x")]);
        assert_eq!(evaluate("=COUNT(A1:A3)", &grid), EvalValue::Number(2.0));
    }

    #[test]
    fn test_min_max() {
        let grid = grid_with(&[(0, 0, "7"), (0, 1, "3"), (0, 2, "9")]);
        assert_eq!(evaluate("=MIN(A1:A3)", &grid), EvalValue::Number(3.0));
        assert_eq!(evaluate("=MAX(A1:A3)", &grid), EvalValue::Number(9.0));

        // Empty range degrades to 0
        assert_eq!(evaluate("=MIN(x)", &grid), EvalValue::Number(0.0));
    }

    #[test]
    fn test_if_numeric_comparison() {
        let grid = grid_with(&[(0, 0, "10")]);
        assert_eq!(
            evaluate("=IF(A1>5,\"big\",\"small\")", &grid),
            EvalValue::Text("big".into())
        );

        let grid = grid_with(&[(0, 0, "3")]);
        assert_eq!(
            evaluate("=IF(A1>5,\"big\",\"small\")", &grid),
            EvalValue::Text("small".into())
        );
    }

    #[test]
    fn test_if_operators() {
        let grid = grid_with(&[(0, 0, "5")]);
        assert_eq!(
            evaluate("=IF(A1>=5,1,0)", &grid),
            EvalValue::Number(1.0)
        );
        assert_eq!(
            evaluate("=IF(A1<=4,1,0)", &grid),
            EvalValue::Number(0.0)
        );
        assert_eq!(evaluate("=IF(A1=5,1,0)", &grid), EvalValue::Number(1.0));
        assert_eq!(evaluate("=IF(A1!=5,1,0)", &grid), EvalValue::Number(0.0));
        assert_eq!(evaluate("=IF(A1<>5,1,0)", &grid), EvalValue::Number(0.0));
    }

    #[test]
    fn test_if_string_equality() {
        let grid = grid_with(&[(0, 0, "yes")]);
        assert_eq!(
            evaluate("=IF(A1=\"yes\",\"y\",\"n\")", &grid),
            EvalValue::Text("y".into())
        );
    }

    #[test]
    fn test_if_branch_resolves_cell_reference() {
        let grid = grid_with(&[(0, 0, "10"), (1, 0, "fallback")]);
        assert_eq!(
            evaluate("=IF(A1>5,B1,\"no\")", &grid),
            EvalValue::Text("fallback".into())
        );
    }

    #[test]
    fn test_if_comma_inside_quotes_does_not_split() {
        let grid = grid_with(&[(0, 0, "1")]);
        assert_eq!(
            evaluate("=IF(A1>0,\"a, b\",\"c\")", &grid),
            EvalValue::Text("a, b".into())
        );
    }

    #[test]
    fn test_if_wrong_arity_is_error() {
        let grid = Grid::new();
        assert_eq!(evaluate("=IF(1>0,1)", &grid), EvalValue::Error);
        assert_eq!(evaluate("=IF(1,2,3,4)", &grid), EvalValue::Error);
    }

    #[test]
    fn test_concat() {
        let grid = grid_with(&[(0, 0, "world"), (1, 0, "3")]);
        assert_eq!(
            evaluate("=CONCAT(\"hello \",A1)", &grid),
            EvalValue::Text("hello world".into())
        );
        assert_eq!(
            evaluate("=CONCAT(B1,\" items\")", &grid),
            EvalValue::Text("3 items".into())
        );
    }

    #[test]
    fn test_bare_reference() {
        let grid = grid_with(&[(0, 0, "hi")]);
        assert_eq!(evaluate("=A1", &grid), EvalValue::Text("hi".into()));
        // Absent cell reads as 0
        assert_eq!(evaluate("=Z9", &grid), EvalValue::Number(0.0));
    }

    #[test]
    fn test_reference_with_huge_column_label_reads_as_zero() {
        // Column labels too long to index must degrade like any other
        // unresolvable reference, in every position a reference can appear.
        let grid = grid_with(&[(0, 0, "5")]);
        assert_eq!(evaluate("=ZZZZZZZZZZZZZZ1", &grid), EvalValue::Number(0.0));
        assert_eq!(evaluate("=A1+ZZZZZZZZZZZZZZ1", &grid), EvalValue::Number(5.0));
        assert_eq!(
            evaluate("=IF(ZZZZZZZZZZZZZZ1>1,\"big\",\"small\")", &grid),
            EvalValue::Text("small".into())
        );
    }

    #[test]
    fn test_arithmetic() {
        let grid = grid_with(&[(0, 0, "10"), (1, 0, "4")]);
        assert_eq!(evaluate("=A1+B1", &grid), EvalValue::Number(14.0));
        assert_eq!(evaluate("=A1*B1", &grid), EvalValue::Number(40.0));
        assert_eq!(evaluate("=(A1-B1)/2", &grid), EvalValue::Number(3.0));
        assert_eq!(evaluate("=1+2*3", &grid), EvalValue::Number(7.0));
        assert_eq!(evaluate("=-5+2", &grid), EvalValue::Number(-3.0));
    }

    #[test]
    fn test_arithmetic_with_currency_cell() {
        let grid = grid_with(&[(0, 0, "$1,200.50")]);
        assert_eq!(evaluate("=A1*2", &grid), EvalValue::Number(2401.0));
    }

    #[test]
    fn test_malformed_is_error() {
        let grid = Grid::new();
        assert_eq!(evaluate("=1+", &grid), EvalValue::Error);
        assert_eq!(evaluate("=(1+2", &grid), EvalValue::Error);
        assert_eq!(evaluate("=hello world", &grid), EvalValue::Error);
        assert_eq!(evaluate("=", &grid), EvalValue::Error);
        assert_eq!(evaluate("=1/0", &grid), EvalValue::Error);
    }

    #[test]
    fn test_unsafe_characters_rejected() {
        let grid = Grid::new();
        assert_eq!(evaluate("=1;2", &grid), EvalValue::Error);
        assert_eq!(evaluate("=2^3", &grid), EvalValue::Error);
    }

    #[test]
    fn test_today_shape() {
        let grid = Grid::new();
        match evaluate("=TODAY()", &grid) {
            EvalValue::Text(s) => assert_eq!(s.split('/').count(), 3),
            other => panic!("expected text date, got {:?}", other),
        }
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_args("\"a,b\",c"), vec!["\"a,b\"", "c"]);
        assert_eq!(split_args("f(x,y),z"), vec!["f(x,y)", "z"]);
        assert_eq!(split_args("only"), vec!["only"]);
    }
}
