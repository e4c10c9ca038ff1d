//! Display formatting and decoration tests through the grid model

mod common;

use common::{assert_approx, test_grid};
use gridblock::grid::decoration::GoalStatus;
use gridblock::grid::{to_number, CellFormat, CellPosition, GridEdit};
use gridblock::{update, GridMsg};

const REPORT: &str = "Loja\tVendas\tMargem\nCentro\t1234.5\t12,5\nNorte\t800\tn/a\nTotal\t2034.5\t10";

fn set(model: &mut gridblock::GridModel, edit: GridEdit) {
    update(model, GridMsg::Apply(edit));
}

#[test]
fn test_headers_and_labels_display_raw() {
    let model = test_grid(REPORT);
    assert_eq!(model.display_text(CellPosition::header(1)), "Vendas");
    assert_eq!(model.display_text(CellPosition::new(0, 0)), "Centro");
}

#[test]
fn test_column_format_changes_display_only() {
    let mut model = test_grid(REPORT);
    set(
        &mut model,
        GridEdit::SetColumnFormat {
            col: 1,
            format: CellFormat::Currency,
        },
    );
    set(&mut model, GridEdit::SetColumnPrecision { col: 1, precision: 2 });

    assert_eq!(model.display_text(CellPosition::new(0, 1)), "R$ 1.234,50");
    assert_eq!(common::cell(&model, 0, 1), "1234.5");
}

#[test]
fn test_percent_column_keeps_text_cells() {
    let mut model = test_grid(REPORT);
    set(
        &mut model,
        GridEdit::SetColumnFormat {
            col: 2,
            format: CellFormat::Percent,
        },
    );
    set(&mut model, GridEdit::SetColumnPrecision { col: 2, precision: 1 });

    assert_eq!(model.display_text(CellPosition::new(0, 2)), "12,5%");
    assert_eq!(model.display_text(CellPosition::new(1, 2)), "n/a");
}

#[test]
fn test_editor_shows_raw_value() {
    let mut model = common::active_grid(REPORT, 0, 1);
    update(&mut model, common::key(gridblock::keymap::KeyCode::Enter));
    assert_eq!(common::edit_buffer(&model).as_deref(), Some("1234.5"));
}

#[test]
fn test_coercion_is_total() {
    for raw in ["", "abc", "--", ",", "R$", "1e10x", "∞"] {
        assert!(to_number(raw).is_finite(), "{:?} did not coerce", raw);
    }
    assert_eq!(to_number("1.234,56"), 1234.56);
    assert_eq!(to_number("1,234.56"), 1234.56);
    assert_eq!(to_number("-7"), -7.0);
    assert_eq!(to_number(f64::NAN), 0.0);
}

#[test]
fn test_decorations_skip_total_row_in_scale() {
    let mut model = test_grid(REPORT);
    set(&mut model, GridEdit::SetTotalRow(true));
    set(&mut model, GridEdit::SetColumnGoal { col: 1, goal: Some(1000.0) });

    let decorations = model.decorations();
    assert_eq!(decorations.len(), 3);

    let centro = decorations[0][0];
    assert_approx(centro.sparkbar, 1.0);
    assert_approx(centro.heat, 1.0);
    assert_eq!(centro.goal, Some(GoalStatus::Met));

    let norte = decorations[1][0];
    assert_approx(norte.heat, 0.0);
    assert_eq!(norte.goal, Some(GoalStatus::Missed));

    assert!(decorations[2][0].summary);
    assert_approx(decorations[2][0].sparkbar, 1.0);
}

#[test]
fn test_text_cells_are_not_decorated() {
    let model = test_grid(REPORT);
    let norte_margin = model.decorations()[1][1];
    assert_eq!(norte_margin.sparkbar, 0.0);
    assert_eq!(norte_margin.goal, None);
}
