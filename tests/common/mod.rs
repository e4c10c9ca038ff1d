//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridblock::grid::CellPosition;
use gridblock::keymap::{KeyCode, KeyPress, Modifiers};
use gridblock::{update, Cmd, GridModel, GridMsg};

/// Three-column sales table used across scenario tests
pub const SALES: &str = "Mês\tReal\tMeta\nJan\t120\t100\nFev\t90\t100";

/// Create a test model for a blob with default config
pub fn test_grid(text: &str) -> GridModel {
    GridModel::from_text(text)
}

/// Create a test model with the active cell already set
pub fn active_grid(text: &str, row: isize, col: usize) -> GridModel {
    let mut model = test_grid(text);
    model.state.activate_at(CellPosition::new(row, col));
    model
}

/// A named key with no modifiers
pub fn key(code: KeyCode) -> GridMsg {
    GridMsg::Key(KeyPress::named(code, Modifiers::NONE))
}

pub fn key_with(code: KeyCode, mods: Modifiers) -> GridMsg {
    GridMsg::Key(KeyPress::named(code, mods))
}

/// The platform jump modifier (Cmd on macOS, Ctrl elsewhere)
pub fn jump(code: KeyCode) -> GridMsg {
    key_with(code, Modifiers::cmd())
}

pub fn shift(code: KeyCode) -> GridMsg {
    key_with(code, Modifiers::SHIFT)
}

/// Type each character as an unmodified key press
pub fn type_text(model: &mut GridModel, text: &str) {
    for ch in text.chars() {
        update(model, GridMsg::Key(KeyPress::typed(ch)));
    }
}

/// Send messages in order, collecting the commands they produced
pub fn send(model: &mut GridModel, msgs: impl IntoIterator<Item = GridMsg>) -> Vec<Cmd> {
    msgs.into_iter()
        .filter_map(|msg| update(model, msg))
        .collect()
}

/// Raw text of a cell (`row == -1` reads a header)
pub fn cell(model: &GridModel, row: isize, col: usize) -> String {
    model.matrix().cell(CellPosition::new(row, col)).to_string()
}

pub fn active(model: &GridModel) -> Option<(isize, usize)> {
    model.state.active_cell.map(|pos| (pos.row, pos.col))
}

pub fn focus(model: &GridModel) -> Option<(isize, usize)> {
    model.state.focus.map(|pos| (pos.row, pos.col))
}

/// Buffer text of the live edit, if any
pub fn edit_buffer(model: &GridModel) -> Option<String> {
    model
        .state
        .editing
        .as_ref()
        .map(|edit| edit.buffer().to_string())
}

pub fn assert_widths_sum_to_100(widths: &[f64]) {
    let sum: f64 = widths.iter().sum();
    assert!(
        (sum - 100.0).abs() < 1e-6,
        "widths {:?} sum to {}",
        widths,
        sum
    );
}

pub fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} but got {}",
        expected,
        actual
    );
}
