//! Tests for formula evaluation against a populated grid

use plume_sheets::prelude::*;

fn sample_grid() -> Grid {
    let mut grid = Grid::new();
    grid.commit_input(0, 0, "1"); // A1
    grid.commit_input(0, 1, "2"); // A2
    grid.commit_input(0, 2, "x"); // A3
    grid.commit_input(1, 0, "10"); // B1
    grid.commit_input(1, 1, "$1,200.50"); // B2
    grid.commit_input(2, 0, "hello"); // C1
    grid
}

#[test]
fn test_reference_parsing() {
    let r = CellRef::parse("AA10").unwrap();
    assert_eq!((r.col, r.row), (26, 9));
    assert_eq!(r.to_string(), "AA10");

    assert!(CellRef::parse("10A").is_err());
}

#[test]
fn test_range_corner_order_is_irrelevant() {
    let a: Vec<_> = CellRange::parse("A1:B2").unwrap().cells().collect();
    let b: Vec<_> = CellRange::parse("B2:A1").unwrap().cells().collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 4);
}

#[test]
fn test_sum_with_text_coercion() {
    let grid = sample_grid();
    assert_eq!(evaluate("=SUM(A1:A3)", &grid), EvalValue::Number(3.0));
}

#[test]
fn test_aggregates_share_coercion() {
    let grid = sample_grid();
    // B2 holds a currency cell stored as 1200.5
    assert_eq!(evaluate("=SUM(B1:B2)", &grid), EvalValue::Number(1210.5));
    assert_eq!(evaluate("=MAX(B1:B2)", &grid), EvalValue::Number(1200.5));
    assert_eq!(evaluate("=MIN(B1:B2)", &grid), EvalValue::Number(10.0));
    assert_eq!(evaluate("=B1+B2", &grid), EvalValue::Number(1210.5));
}

#[test]
fn test_if_branches() {
    let mut grid = Grid::new();
    grid.commit_input(0, 0, "10");
    assert_eq!(
        evaluate("=IF(A1>5,\"big\",\"small\")", &grid),
        EvalValue::Text("big".into())
    );

    grid.commit_input(0, 0, "3");
    assert_eq!(
        evaluate("=IF(A1>5,\"big\",\"small\")", &grid),
        EvalValue::Text("small".into())
    );
}

#[test]
fn test_concat_mixes_literals_and_references() {
    let grid = sample_grid();
    assert_eq!(
        evaluate("=CONCAT(C1,\" world \",A1)", &grid),
        EvalValue::Text("hello world 1".into())
    );
}

#[test]
fn test_unknown_function_is_error() {
    let grid = sample_grid();
    assert_eq!(evaluate("=FROBNICATE(A1)", &grid), EvalValue::Error);
    assert_eq!(EvalValue::Error.to_string(), ERROR_MARKER);
}

#[test]
fn test_evaluation_does_not_mutate_grid() {
    let grid = sample_grid();
    let before = grid.to_json().unwrap();
    let _ = evaluate("=SUM(A1:C3)", &grid);
    let _ = evaluate("=IF(A1>0,B2,C1)", &grid);
    assert_eq!(grid.to_json().unwrap(), before);
}

#[test]
fn test_display_formatting_end_to_end() {
    let mut editor = SheetEditor::new();
    editor.commit_cell(0, 0, "1000000");
    editor.commit_cell(0, 1, "$1,200.50");
    editor.commit_cell(0, 2, "[x]");
    editor.commit_cell(0, 3, "2024-03-15");
    editor.commit_cell(0, 4, "=SUM(A1:A2)");

    assert_eq!(editor.display_value(0, 0), "1,000,000");
    assert_eq!(editor.display_value(0, 1), "$1,200.5");
    assert_eq!(editor.display_value(0, 2), CHECKED_GLYPH);
    assert_eq!(editor.display_value(0, 3), "3/15/2024");
    assert_eq!(editor.display_value(0, 4), "1,001,200.5");

    // Rendering twice yields identical output
    assert_eq!(editor.display_value(0, 4), "1,001,200.5");
}
