//! Parsing tests - separator preservation across edits, typed matrices and document exchange

mod common;

use common::{active_grid, cell, key, type_text, SALES};
use gridblock::grid::{parse, parse_numeric, CellFormat, GridDocument, GridEdit, Separator};
use gridblock::keymap::KeyCode;
use gridblock::{update, GridConfig, GridMsg};

#[test]
fn test_semicolon_blob_keeps_separator_after_edit() {
    let mut model = active_grid("Mês;Real\nJan;1.234,56\nFev;80", 1, 1);
    type_text(&mut model, "81");
    update(&mut model, key(KeyCode::Tab));

    assert_eq!(model.document.data, "Mês;Real\nJan;1.234,56\nFev;81");
    assert_eq!(model.document.separator(), Separator::Semicolon);
}

#[test]
fn test_space_aligned_blob_switches_to_tab_when_cell_cleared() {
    let mut model = active_grid("Mês  Real  Meta\nJan  120  100", 0, 2);
    update(&mut model, key(KeyCode::Delete));

    assert_eq!(model.document.data, "Mês\tReal\tMeta\nJan\t120\t");
    assert_eq!(cell(&model, 0, 2), "");
    assert_eq!(model.dimensions().cols, 3);
}

#[test]
fn test_blank_lines_do_not_become_rows() {
    let model = common::test_grid("\n\nMês\tReal\n\nJan\t1\n   \nFev\t2\n");
    assert_eq!(model.dimensions().rows, 2);
    assert_eq!(cell(&model, 1, 0), "Fev");
}

#[test]
fn test_empty_blob_shows_scaffold_and_first_edit_materializes_it() {
    let mut model = active_grid("", -1, 0);
    assert_eq!(cell(&model, -1, 0), "Categoria");
    assert_eq!(cell(&model, -1, 1), "Valor");

    type_text(&mut model, "Produto");
    update(&mut model, GridMsg::Blur);
    assert_eq!(model.document.data, "Produto\tValor");
}

#[test]
fn test_numeric_view_feeds_series() {
    let matrix = parse_numeric(SALES);
    assert_eq!(
        matrix.series(),
        vec![
            ("Real".to_string(), vec![120.0, 90.0]),
            ("Meta".to_string(), vec![100.0, 100.0]),
        ]
    );
    assert_eq!(matrix.labels(), vec!["Jan", "Fev"]);
}

#[test]
fn test_duplicate_headers_are_display_only() {
    let doc = GridDocument::new("A\tA\nx\t1");
    assert_eq!(parse(&doc.data).headers, vec!["A", "A (2)"]);
    assert_eq!(doc.data, "A\tA\nx\t1");
}

#[test]
fn test_document_json_exchange() {
    let mut doc = GridDocument::new(SALES);
    gridblock::grid::apply_edit(
        &mut doc,
        &GridEdit::SetColumnFormat {
            col: 2,
            format: CellFormat::Percent,
        },
        &GridConfig::default(),
    );

    let json = doc.to_json().unwrap();
    let restored = GridDocument::from_json(&json).unwrap();
    assert_eq!(restored.data, doc.data);
    assert_eq!(restored.row_flags, doc.row_flags);
    assert_eq!(restored.columns.formats, doc.columns.formats);
    assert_eq!(restored.columns.format(2), CellFormat::Percent);
}

#[test]
fn test_json_with_short_metadata_is_normalized() {
    let json = r#"{"data":"A\tB\tC\nx\t1\t2","columns":{"widths":[50.0,50.0]}}"#;
    let doc = GridDocument::from_json(json).unwrap();
    assert_eq!(doc.columns.len(), 3);
    assert_eq!(doc.columns.widths, vec![100.0 / 3.0; 3]);
}

// ========================================================================
// Separator stability
// ========================================================================

fn apply(doc: &mut GridDocument, edit: GridEdit) -> bool {
    gridblock::grid::apply_edit(doc, &edit, &GridConfig::default())
}

#[test]
fn test_semicolon_in_comma_header_keeps_rows_intact() {
    let mut doc = GridDocument::new("A,B\nx,1\ny,2");
    assert!(apply(
        &mut doc,
        GridEdit::RenameHeader {
            col: 1,
            title: "B;C".into(),
        },
    ));

    let m = parse(&doc.data);
    assert_eq!(m.headers, vec!["A", "B;C"]);
    assert_eq!(m.rows[0].label, "x");
    assert_eq!(m.rows[1].values, vec!["2"]);
}

#[test]
fn test_comma_in_space_aligned_header_keeps_rows_intact() {
    let mut doc = GridDocument::new("Mês  Real\nJan  120");
    apply(
        &mut doc,
        GridEdit::RenameHeader {
            col: 1,
            title: "Real, R$".into(),
        },
    );

    let m = parse(&doc.data);
    assert_eq!(m.headers, vec!["Mês", "Real, R$"]);
    assert_eq!(m.rows[0].label, "Jan");
    assert_eq!(m.rows[0].values, vec!["120"]);
}

#[test]
fn test_comma_grid_reduced_to_one_column_keeps_quoted_labels() {
    let mut doc = GridDocument::new("A,B\n\"x,y\",1");
    assert!(apply(&mut doc, GridEdit::DeleteColumns { first: 1, last: 1 }));

    let m = parse(&doc.data);
    assert_eq!(m.headers, vec!["A"]);
    assert_eq!(m.rows[0].label, "x,y");
}

#[test]
fn test_renamed_lone_header_cannot_split_itself() {
    let mut doc = GridDocument::new("Item\nA");
    apply(
        &mut doc,
        GridEdit::RenameHeader {
            col: 0,
            title: "Item; total".into(),
        },
    );

    let m = parse(&doc.data);
    assert_eq!(m.headers, vec!["Item total"]);
    assert_eq!(m.rows[0].label, "A");
}
