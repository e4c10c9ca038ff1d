//! Navigation, selection and edit state for a grid session

use super::edit::CellEditState;
use super::model::{CellPosition, Dimensions};
use super::selection::Selection;

/// Coarse state of the grid's interaction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// No active cell; keyboard input is ignored
    Idle,
    /// Active cell set, selection optionally extended
    Navigating,
    /// Active cell set with a live edit buffer
    Editing,
}

impl GridMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            GridMode::Idle => "IDLE",
            GridMode::Navigating => "NAVIGATING",
            GridMode::Editing => "EDITING",
        }
    }
}

/// Session-owned interaction state
///
/// Reset to empty whenever the grid stops being the active block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    /// Cell targeted by keyboard navigation
    pub active_cell: Option<CellPosition>,
    /// End of an extended range selection
    pub focus: Option<CellPosition>,
    /// Edit buffer (Some while editing)
    pub editing: Option<CellEditState>,
}

impl GridState {
    pub fn mode(&self) -> GridMode {
        match (&self.active_cell, &self.editing) {
            (None, _) => GridMode::Idle,
            (Some(_), None) => GridMode::Navigating,
            (Some(_), Some(_)) => GridMode::Editing,
        }
    }

    /// Whether the grid currently accepts keyboard input
    pub fn is_active(&self) -> bool {
        self.active_cell.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Current selection; a lone active cell is a single-cell selection
    pub fn selection(&self) -> Option<Selection> {
        let anchor = self.active_cell?;
        Some(Selection::new(anchor, self.focus.unwrap_or(anchor)))
    }

    /// Whether a multi-cell range is selected
    pub fn has_range(&self) -> bool {
        self.selection().is_some_and(|sel| !sel.is_single_cell())
    }

    /// Make `cell` the active cell, collapsing any range
    pub fn activate_at(&mut self, cell: CellPosition) {
        self.active_cell = Some(cell);
        self.focus = None;
        self.editing = None;
    }

    /// Drop all interaction state (grid deselected)
    pub fn deactivate(&mut self) {
        *self = Self::default();
    }

    /// Clear state pointing outside the matrix, returning whether it did
    pub fn discard_if_out_of_bounds(&mut self, dims: Dimensions) -> bool {
        let stale = |pos: &Option<CellPosition>| pos.is_some_and(|p| !dims.contains(p));
        let edit_stale = self
            .editing
            .as_ref()
            .is_some_and(|edit| !dims.contains(edit.position));

        if stale(&self.active_cell) || stale(&self.focus) || edit_stale {
            tracing::debug!(
                "Grid state out of bounds for {}x{}, deactivating",
                dims.rows,
                dims.cols
            );
            self.deactivate();
            true
        } else {
            false
        }
    }
}
