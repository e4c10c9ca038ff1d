//! Grid update functions
//!
//! Handles GridMsg messages: keyboard dispatch, navigation, cell editing,
//! clipboard, toolbar edits and column resize sessions.

use crate::commands::Cmd;
use crate::grid::{
    classify_paste, CellPosition, Dimensions, Direction, GridEdit, GridState, PasteKind,
    ResizeSession, HEADER_ROW,
};
use crate::keymap::KeyPress;
use crate::messages::GridMsg;
use crate::model::GridModel;

/// Handle grid messages
pub fn update_grid(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    // A live resize owns pointer dispatch until released
    if model.resize.is_some() {
        return update_resize(model, msg);
    }

    match msg {
        GridMsg::Activate => activate(model),
        GridMsg::Deactivate => deactivate(model),
        GridMsg::Blur => blur(model),
        GridMsg::Key(press) => dispatch_key(model, press),

        // Navigation
        GridMsg::Move(direction) => navigate(model, |state, dims| {
            state.move_active(direction, dims)
        }),
        GridMsg::Extend(direction) => navigate(model, |state, dims| {
            state.extend_selection(direction, dims)
        }),
        GridMsg::Jump(direction) => navigate(model, |state, dims| {
            state.jump_to_edge(direction, dims)
        }),
        GridMsg::ExtendToEdge(direction) => navigate(model, |state, dims| {
            state.extend_to_edge(direction, dims)
        }),
        GridMsg::NextCell => navigate(model, |state, dims| state.move_to_next_cell(dims)),
        GridMsg::PrevCell => navigate(model, |state, dims| state.move_to_prev_cell(dims)),
        GridMsg::SelectCell { row, col, extend } => select_cell(model, row, col, extend),

        // Cell editing
        GridMsg::StartEditing => start_editing(model),
        GridMsg::TypeChar(ch) => type_char(model, ch),
        GridMsg::ClearCell => clear_cell(model),
        GridMsg::ConfirmEdit => confirm_edit_down(model),
        GridMsg::ConfirmEditUp => confirm_edit_and_move(model, Direction::Up),
        GridMsg::ConfirmEditNext => confirm_edit_and_move(model, Direction::Right),
        GridMsg::ConfirmEditPrev => confirm_edit_and_move(model, Direction::Left),
        GridMsg::CancelEdit => cancel_edit(model),
        GridMsg::EditInsertChar(ch) => edit_buffer(model, |state| state.edit_insert_char(ch)),
        GridMsg::EditDeleteBackward => edit_buffer(model, |state| state.edit_delete_backward()),
        GridMsg::EditDeleteForward => edit_buffer(model, |state| state.edit_delete_forward()),
        GridMsg::EditCursorLeft => edit_buffer(model, |state| state.edit_cursor_left()),
        GridMsg::EditCursorRight => edit_buffer(model, |state| state.edit_cursor_right()),
        GridMsg::EditCursorHome => edit_buffer(model, |state| state.edit_cursor_home()),
        GridMsg::EditCursorEnd => edit_buffer(model, |state| state.edit_cursor_end()),

        // Clipboard
        GridMsg::Paste(text) => paste(model, &text),
        GridMsg::PasteFromClipboard => {
            let text = crate::clipboard::read_text()?;
            paste(model, &text)
        }
        GridMsg::Copy => copy(model),

        // Toolbar
        GridMsg::InsertRowBelow => insert_row_below(model),
        GridMsg::InsertColumnRight => insert_column_right(model),
        GridMsg::DeleteSelectedRows => delete_selected_rows(model),
        GridMsg::DeleteSelectedColumns => delete_selected_columns(model),
        GridMsg::Apply(edit) => apply(model, edit),

        // Column resize
        GridMsg::BeginResize {
            col,
            pointer_x,
            container_width,
        } => begin_resize(model, col, pointer_x, container_width),
        GridMsg::PointerMove { .. } | GridMsg::PointerUp | GridMsg::PointerCancel => None,

        GridMsg::Load(document) => {
            model.load(document);
            Some(Cmd::Redraw)
        }
    }
}

/// Commit-and-redraw when the document changed, plain redraw otherwise
fn finish(model: &GridModel, changed: bool) -> Option<Cmd> {
    if changed {
        Some(Cmd::commit(model.document.clone()))
    } else {
        Some(Cmd::Redraw)
    }
}

/// Write the live edit buffer into the document, returning whether it changed
fn commit_buffer(model: &mut GridModel) -> bool {
    match model.state.confirm_edit() {
        Some(edit) => {
            tracing::debug!(
                "Committing {} ({:?} -> {:?})",
                edit.position,
                edit.old_value,
                edit.new_value
            );
            model.apply(&GridEdit::set_cell(edit.position, edit.new_value))
        }
        None => false,
    }
}

// === Activation ===

fn activate(model: &mut GridModel) -> Option<Cmd> {
    if model.state.is_active() {
        return None;
    }
    let dims = model.dimensions();
    let row = if dims.rows > 0 { 0 } else { HEADER_ROW };
    model.state.activate_at(CellPosition::new(row, 0));
    Some(Cmd::Redraw)
}

/// The block lost selection: commit any live edit, then drop all state
fn deactivate(model: &mut GridModel) -> Option<Cmd> {
    if !model.state.is_active() {
        return None;
    }
    let changed = commit_buffer(model);
    model.state.deactivate();
    finish(model, changed)
}

/// Focus left the grid; a live edit is committed in place
fn blur(model: &mut GridModel) -> Option<Cmd> {
    if !model.state.is_editing() {
        return None;
    }
    let changed = commit_buffer(model);
    finish(model, changed)
}

/// Resolve a key through the keymap, falling back to text input
fn dispatch_key(model: &mut GridModel, press: KeyPress) -> Option<Cmd> {
    if !model.state.is_active() {
        return None;
    }

    let ctx = model.key_context();
    if let Some(command) = model.keymap.lookup(&press.stroke, &ctx) {
        tracing::trace!("Key {} -> {:?}", press.stroke, command);
        return command.to_msg().and_then(|msg| update_grid(model, msg));
    }

    let ch = press.printable()?;
    if model.state.is_editing() {
        update_grid(model, GridMsg::EditInsertChar(ch))
    } else {
        update_grid(model, GridMsg::TypeChar(ch))
    }
}

// === Navigation ===

fn navigate(
    model: &mut GridModel,
    f: impl FnOnce(&mut GridState, Dimensions),
) -> Option<Cmd> {
    if !model.state.is_active() || model.state.is_editing() {
        return None;
    }
    let dims = model.dimensions();
    f(&mut model.state, dims);
    Some(Cmd::Redraw)
}

/// Pointer selection; clicking while editing commits first
fn select_cell(model: &mut GridModel, row: isize, col: usize, extend: bool) -> Option<Cmd> {
    let changed = commit_buffer(model);
    let dims = model.dimensions();
    model
        .state
        .select_cell(CellPosition::new(row, col), extend, dims);
    finish(model, changed)
}

// === Cell editing ===

fn start_editing(model: &mut GridModel) -> Option<Cmd> {
    if !model.state.is_active() || model.state.is_editing() {
        return None;
    }
    let matrix = model.matrix();
    model.state.start_editing(&matrix);
    Some(Cmd::Redraw)
}

/// Type-to-replace: the buffer starts as just this character
fn type_char(model: &mut GridModel, ch: char) -> Option<Cmd> {
    if !model.state.is_active() || model.state.is_editing() {
        return None;
    }
    let matrix = model.matrix();
    model.state.start_editing_with_char(&matrix, ch);
    Some(Cmd::Redraw)
}

fn clear_cell(model: &mut GridModel) -> Option<Cmd> {
    if model.state.is_editing() {
        return None;
    }
    let active = model.state.active_cell?;
    let changed = model.apply(&GridEdit::ClearCell(active));
    finish(model, changed)
}

/// Enter: commit and move down, growing the matrix from its last row
fn confirm_edit_down(model: &mut GridModel) -> Option<Cmd> {
    if !model.state.is_editing() {
        return None;
    }
    let mut changed = commit_buffer(model);
    let active = model.state.active_cell?;
    let dims = model.dimensions();

    if active.row == dims.last_row() {
        changed |= model.apply(&GridEdit::AppendRow);
        let new_row = CellPosition::new(dims.rows as isize, active.col);
        tracing::debug!("Grew grid to {} rows from Enter", dims.rows + 1);
        model.state.activate_at(new_row);
    } else {
        model.state.move_active(Direction::Down, dims);
    }

    finish(model, changed)
}

fn confirm_edit_and_move(model: &mut GridModel, direction: Direction) -> Option<Cmd> {
    if !model.state.is_editing() {
        return None;
    }
    let changed = commit_buffer(model);
    let dims = model.dimensions();
    model.state.move_active(direction, dims);
    finish(model, changed)
}

fn cancel_edit(model: &mut GridModel) -> Option<Cmd> {
    if !model.state.is_editing() {
        return None;
    }
    model.state.cancel_edit();
    Some(Cmd::Redraw)
}

fn edit_buffer(model: &mut GridModel, f: impl FnOnce(&mut GridState)) -> Option<Cmd> {
    if !model.state.is_editing() {
        return None;
    }
    f(&mut model.state);
    Some(Cmd::Redraw)
}

// === Clipboard ===

/// Smart paste at the active cell
///
/// A single literal goes through the edit buffer like typed text; blocks
/// are written straight into the document.
fn paste(model: &mut GridModel, text: &str) -> Option<Cmd> {
    let anchor = model.state.active_cell?;

    match classify_paste(text) {
        PasteKind::Literal(value) => {
            if model.state.is_editing() {
                model.state.edit_insert_text(&value);
            } else {
                let matrix = model.matrix();
                model.state.start_editing_with_text(&matrix, &value);
            }
            Some(Cmd::Redraw)
        }
        PasteKind::Block(_) => {
            let mut changed = commit_buffer(model);
            changed |= model.apply(&GridEdit::Paste {
                anchor,
                text: text.to_string(),
            });
            finish(model, changed)
        }
    }
}

/// Copy the selection (or active cell) as tab-separated text
fn copy(model: &mut GridModel) -> Option<Cmd> {
    if model.state.is_editing() {
        return None;
    }
    let selection = model.state.selection()?;
    let matrix = model.matrix();
    let cols = selection.cols();

    let text = selection
        .rows()
        .map(|row| {
            cols.clone()
                .map(|col| matrix.cell(CellPosition::new(row, col)))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(Cmd::SetClipboard(text))
}

// === Toolbar ===

fn insert_row_below(model: &mut GridModel) -> Option<Cmd> {
    let active = model.state.active_cell?;
    let mut changed = commit_buffer(model);
    changed |= model.apply(&GridEdit::InsertRow { after: active.row });
    model
        .state
        .activate_at(CellPosition::new(active.row + 1, active.col));
    finish(model, changed)
}

fn insert_column_right(model: &mut GridModel) -> Option<Cmd> {
    let active = model.state.active_cell?;
    let mut changed = commit_buffer(model);
    let at = active.col + 1;
    changed |= model.apply(&GridEdit::InsertColumn { at });
    model.state.activate_at(CellPosition::new(active.row, at));
    finish(model, changed)
}

fn delete_selected_rows(model: &mut GridModel) -> Option<Cmd> {
    if model.state.is_editing() {
        return None;
    }
    let rows = model.state.selection()?.data_rows()?;
    model.state.focus = None;
    let changed = model.apply(&GridEdit::DeleteRows {
        first: *rows.start(),
        last: *rows.end(),
    });
    finish(model, changed)
}

fn delete_selected_columns(model: &mut GridModel) -> Option<Cmd> {
    if model.state.is_editing() {
        return None;
    }
    let cols = model.state.selection()?.cols();
    model.state.focus = None;
    let changed = model.apply(&GridEdit::DeleteColumns {
        first: *cols.start(),
        last: *cols.end(),
    });
    finish(model, changed)
}

fn apply(model: &mut GridModel, edit: GridEdit) -> Option<Cmd> {
    let mut changed = false;
    if edit.is_structural() {
        changed |= commit_buffer(model);
    }
    changed |= model.apply(&edit);
    finish(model, changed)
}

// === Column resize ===

fn begin_resize(
    model: &mut GridModel,
    col: usize,
    pointer_x: f64,
    container_width: f64,
) -> Option<Cmd> {
    let widths = model.document.columns.widths.clone();
    if col >= widths.len() {
        return None;
    }
    model.resize = Some(ResizeSession::begin(
        col,
        widths,
        pointer_x,
        container_width,
        model.config.min_column_width,
    ));
    Some(Cmd::Redraw)
}

/// Pointer dispatch while a resize session is live
fn update_resize(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::PointerMove { x } => {
            let session = model.resize.as_mut()?;
            session.pointer_moved(x);
            Some(Cmd::Redraw)
        }
        GridMsg::PointerUp | GridMsg::PointerCancel => {
            let widths = model.resize.take()?.end();
            let changed = model.apply(&GridEdit::SetColumnWidths(widths));
            finish(model, changed)
        }
        other => {
            tracing::trace!("Ignoring {:?} during column resize", other);
            None
        }
    }
}
