//! Cell navigation and edit-mode transitions
//!
//! Every movement takes the current [`Dimensions`] because the matrix is
//! rebuilt from the blob on each interaction and never owned by the state.

use super::edit::{CellEdit, CellEditState};
use super::model::{CellPosition, Dimensions, Matrix, HEADER_ROW};
use super::state::GridState;

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// One step from `from`, clamped to `[-1, rows-1] x [0, cols-1]`
pub fn step(from: CellPosition, direction: Direction, dims: Dimensions) -> CellPosition {
    let (dr, dc) = direction.delta();
    let row = (from.row + dr).clamp(HEADER_ROW, dims.last_row().max(HEADER_ROW));
    let col = (from.col as isize + dc).clamp(0, dims.last_col() as isize) as usize;
    CellPosition::new(row, col)
}

/// The edge cell reached from `from` when jumping in `direction`
pub fn edge(from: CellPosition, direction: Direction, dims: Dimensions) -> CellPosition {
    match direction {
        Direction::Up => CellPosition::new(HEADER_ROW, from.col),
        Direction::Down => CellPosition::new(dims.last_row(), from.col),
        Direction::Left => CellPosition::new(from.row, 0),
        Direction::Right => CellPosition::new(from.row, dims.last_col()),
    }
}

/// Clamp an arbitrary position into the matrix (header row included)
pub fn clamp(pos: CellPosition, dims: Dimensions) -> CellPosition {
    CellPosition::new(
        pos.row.clamp(HEADER_ROW, dims.last_row().max(HEADER_ROW)),
        pos.col.min(dims.last_col()),
    )
}

impl GridState {
    /// Move the active cell one step, collapsing any range
    pub fn move_active(&mut self, direction: Direction, dims: Dimensions) {
        if let Some(active) = self.active_cell {
            self.active_cell = Some(step(active, direction, dims));
            self.focus = None;
        }
    }

    /// Extend the range focus one step (from the active cell if no focus yet)
    pub fn extend_selection(&mut self, direction: Direction, dims: Dimensions) {
        if let Some(active) = self.active_cell {
            let from = self.focus.unwrap_or(active);
            self.focus = Some(step(from, direction, dims));
        }
    }

    /// Move the active cell straight to an edge
    pub fn jump_to_edge(&mut self, direction: Direction, dims: Dimensions) {
        if let Some(active) = self.active_cell {
            self.active_cell = Some(edge(active, direction, dims));
            self.focus = None;
        }
    }

    /// Extend the range focus straight to an edge
    pub fn extend_to_edge(&mut self, direction: Direction, dims: Dimensions) {
        if let Some(active) = self.active_cell {
            let from = self.focus.unwrap_or(active);
            self.focus = Some(edge(from, direction, dims));
        }
    }

    /// Move one column right (Tab); clamped, never wraps rows
    pub fn move_to_next_cell(&mut self, dims: Dimensions) {
        self.move_active(Direction::Right, dims);
    }

    /// Move one column left (Shift+Tab)
    pub fn move_to_prev_cell(&mut self, dims: Dimensions) {
        self.move_active(Direction::Left, dims);
    }

    /// Click selection: activate a cell, or extend the range with `extend`
    pub fn select_cell(&mut self, pos: CellPosition, extend: bool, dims: Dimensions) {
        let pos = clamp(pos, dims);
        match self.active_cell {
            Some(_) if extend => {
                self.focus = Some(pos);
                self.editing = None;
            }
            _ => self.activate_at(pos),
        }
    }

    /// Start editing the active cell, seeded with its current text
    pub fn start_editing(&mut self, matrix: &Matrix) {
        if let Some(active) = self.active_cell {
            let value = matrix.cell(active).to_string();
            self.focus = None;
            self.editing = Some(CellEditState::new(active, value));
        }
    }

    /// Start editing with the buffer overwritten by one typed character
    pub fn start_editing_with_char(&mut self, matrix: &Matrix, ch: char) {
        if let Some(active) = self.active_cell {
            let original = matrix.cell(active).to_string();
            self.focus = None;
            self.editing = Some(CellEditState::with_char(active, original, ch));
        }
    }

    /// Start editing with the buffer overwritten by literal pasted text
    pub fn start_editing_with_text(&mut self, matrix: &Matrix, text: &str) {
        if let Some(active) = self.active_cell {
            let original = matrix.cell(active).to_string();
            self.focus = None;
            self.editing = Some(CellEditState::with_text(active, original, text));
        }
    }

    /// Leave edit mode, returning the change if the buffer differs
    pub fn confirm_edit(&mut self) -> Option<CellEdit> {
        let edit_state = self.editing.take()?;

        if !edit_state.is_modified() {
            return None;
        }

        Some(CellEdit {
            position: edit_state.position,
            new_value: edit_state.buffer().to_string(),
            old_value: edit_state.original,
        })
    }

    /// Leave edit mode discarding the buffer
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn edit_insert_char(&mut self, ch: char) {
        if let Some(edit) = &mut self.editing {
            edit.insert_char(ch);
        }
    }

    pub fn edit_insert_text(&mut self, text: &str) {
        if let Some(edit) = &mut self.editing {
            edit.insert_text(text);
        }
    }

    pub fn edit_delete_backward(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.delete_backward();
        }
    }

    pub fn edit_delete_forward(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.delete_forward();
        }
    }

    pub fn edit_cursor_left(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.cursor_left();
        }
    }

    pub fn edit_cursor_right(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.cursor_right();
        }
    }

    pub fn edit_cursor_home(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.cursor_home();
        }
    }

    pub fn edit_cursor_end(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.cursor_end();
        }
    }
}
