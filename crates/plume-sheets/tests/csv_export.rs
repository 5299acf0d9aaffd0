//! Tests for delimited export through the editor

use plume_sheets::prelude::*;

#[test]
fn test_export_quotes_embedded_delimiters() {
    let mut editor = SheetEditor::new();
    editor.commit_cell(0, 0, "Hello, \"World\"");

    let out = editor.export_csv().unwrap();
    assert!(out.starts_with("\"Hello, \"\"World\"\"\""));
}

#[test]
fn test_export_one_line_per_row() {
    let editor = SheetEditor::new();
    let out = editor.export_csv().unwrap();
    assert_eq!(out.lines().count(), editor.row_count());
}

#[test]
fn test_export_import_roundtrip_values() {
    let mut editor = SheetEditor::new();
    editor.commit_cell(0, 0, "name");
    editor.commit_cell(1, 0, "amount");
    editor.commit_cell(0, 1, "widget");
    editor.commit_cell(1, 1, "42");

    let out = editor.export_csv().unwrap();

    let mut restored = SheetEditor::new();
    restored.import_csv(&out).unwrap();
    assert_eq!(restored.value(0, 1), CellValue::text("widget"));
    assert_eq!(restored.value(1, 1), CellValue::Number(42.0));
}
