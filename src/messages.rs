//! Message types for the Elm-style architecture
//!
//! All grid state changes flow through [`GridMsg`].

pub use crate::grid::navigation::Direction;

use crate::grid::{GridDocument, GridEdit};
use crate::keymap::KeyPress;

/// Messages handled by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    // === Activation ===
    /// The surrounding block became the active one
    Activate,
    /// The surrounding block was deselected; all session state is dropped
    Deactivate,
    /// Keyboard focus left the grid (commits a live edit)
    Blur,

    // === Input ===
    /// Raw key event, resolved through the keymap
    Key(KeyPress),

    // === Navigation ===
    Move(Direction),
    /// Extend the range focus one step (range modifier)
    Extend(Direction),
    /// Move to an edge (jump modifier)
    Jump(Direction),
    /// Extend the range focus to an edge (jump + range modifiers)
    ExtendToEdge(Direction),
    /// Tab
    NextCell,
    /// Shift+Tab
    PrevCell,
    /// Pointer selection; `extend` sets the range focus instead
    SelectCell {
        row: isize,
        col: usize,
        extend: bool,
    },

    // === Editing ===
    /// Open the editor seeded with the cell text (Enter / F2)
    StartEditing,
    /// Type-to-replace: open the editor with just this character
    TypeChar(char),
    /// Clear the active cell without editing
    ClearCell,
    /// Commit and move down (growing the matrix on the last row)
    ConfirmEdit,
    /// Commit and move up
    ConfirmEditUp,
    /// Commit and move right
    ConfirmEditNext,
    /// Commit and move left
    ConfirmEditPrev,
    /// Discard the buffer
    CancelEdit,
    EditInsertChar(char),
    EditDeleteBackward,
    EditDeleteForward,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,

    // === Clipboard ===
    /// Paste text at the active cell
    Paste(String),
    /// Read the system clipboard and paste it
    PasteFromClipboard,
    /// Copy the selection as tab-separated text
    Copy,

    // === Toolbar ===
    InsertRowBelow,
    InsertColumnRight,
    DeleteSelectedRows,
    DeleteSelectedColumns,
    /// Any other tagged edit (column metadata, flags, …)
    Apply(GridEdit),

    // === Column resize ===
    /// Pointer down on a column's resize handle
    BeginResize {
        col: usize,
        pointer_x: f64,
        container_width: f64,
    },
    PointerMove {
        x: f64,
    },
    PointerUp,
    PointerCancel,

    // === Document ===
    /// Replace the document (external change)
    Load(GridDocument),
}
