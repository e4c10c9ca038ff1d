//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.

use crate::grid::GridDocument;

/// Side effects requested by an update
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Repaint the grid
    Redraw,
    /// Hand the updated document back to the surrounding container
    Commit(GridDocument),
    /// Put text on the system clipboard
    SetClipboard(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Commit plus redraw, the result of every applied mutation
    pub fn commit(document: GridDocument) -> Self {
        Cmd::Batch(vec![Cmd::Commit(document), Cmd::Redraw])
    }

    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            // The container re-renders from the committed document
            Cmd::Commit(_) => true,
            Cmd::SetClipboard(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::needs_redraw),
        }
    }

    /// The committed document, if this command carries one
    pub fn committed(&self) -> Option<&GridDocument> {
        match self {
            Cmd::Commit(doc) => Some(doc),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(Cmd::committed),
            _ => None,
        }
    }

    /// Text to place on the clipboard, if this command carries any
    pub fn clipboard_text(&self) -> Option<&str> {
        match self {
            Cmd::SetClipboard(text) => Some(text),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::clipboard_text),
            _ => None,
        }
    }
}
