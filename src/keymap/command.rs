//! Command enum representing every grid action that can be bound to a key
//!
//! Commands are the bridge between keybindings and the message system.

use std::str::FromStr;

use crate::messages::{Direction, GridMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Navigation
    // ========================================================================
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ExtendUp,
    ExtendDown,
    ExtendLeft,
    ExtendRight,
    JumpUp,
    JumpDown,
    JumpLeft,
    JumpRight,
    ExtendToEdgeUp,
    ExtendToEdgeDown,
    ExtendToEdgeLeft,
    ExtendToEdgeRight,
    NextCell,
    PrevCell,
    /// Leave the grid (Escape while navigating)
    Deactivate,

    // ========================================================================
    // Cell editing
    // ========================================================================
    StartEditing,
    ClearCell,
    ConfirmEdit,
    ConfirmEditUp,
    ConfirmEditNext,
    ConfirmEditPrev,
    CancelEdit,
    EditDeleteBackward,
    EditDeleteForward,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,

    // ========================================================================
    // Clipboard
    // ========================================================================
    Copy,
    Paste,

    // ========================================================================
    // Structure
    // ========================================================================
    InsertRowBelow,
    InsertColumnRight,
    DeleteSelectedRows,
    DeleteSelectedColumns,

    /// Removes a default binding when used in an override
    Unbound,
}

impl Command {
    /// The message this command dispatches
    pub fn to_msg(self) -> Option<GridMsg> {
        use Command::*;

        let msg = match self {
            MoveUp => GridMsg::Move(Direction::Up),
            MoveDown => GridMsg::Move(Direction::Down),
            MoveLeft => GridMsg::Move(Direction::Left),
            MoveRight => GridMsg::Move(Direction::Right),
            ExtendUp => GridMsg::Extend(Direction::Up),
            ExtendDown => GridMsg::Extend(Direction::Down),
            ExtendLeft => GridMsg::Extend(Direction::Left),
            ExtendRight => GridMsg::Extend(Direction::Right),
            JumpUp => GridMsg::Jump(Direction::Up),
            JumpDown => GridMsg::Jump(Direction::Down),
            JumpLeft => GridMsg::Jump(Direction::Left),
            JumpRight => GridMsg::Jump(Direction::Right),
            ExtendToEdgeUp => GridMsg::ExtendToEdge(Direction::Up),
            ExtendToEdgeDown => GridMsg::ExtendToEdge(Direction::Down),
            ExtendToEdgeLeft => GridMsg::ExtendToEdge(Direction::Left),
            ExtendToEdgeRight => GridMsg::ExtendToEdge(Direction::Right),
            NextCell => GridMsg::NextCell,
            PrevCell => GridMsg::PrevCell,
            Deactivate => GridMsg::Deactivate,

            StartEditing => GridMsg::StartEditing,
            ClearCell => GridMsg::ClearCell,
            ConfirmEdit => GridMsg::ConfirmEdit,
            ConfirmEditUp => GridMsg::ConfirmEditUp,
            ConfirmEditNext => GridMsg::ConfirmEditNext,
            ConfirmEditPrev => GridMsg::ConfirmEditPrev,
            CancelEdit => GridMsg::CancelEdit,
            EditDeleteBackward => GridMsg::EditDeleteBackward,
            EditDeleteForward => GridMsg::EditDeleteForward,
            EditCursorLeft => GridMsg::EditCursorLeft,
            EditCursorRight => GridMsg::EditCursorRight,
            EditCursorHome => GridMsg::EditCursorHome,
            EditCursorEnd => GridMsg::EditCursorEnd,

            Copy => GridMsg::Copy,
            Paste => GridMsg::PasteFromClipboard,

            InsertRowBelow => GridMsg::InsertRowBelow,
            InsertColumnRight => GridMsg::InsertColumnRight,
            DeleteSelectedRows => GridMsg::DeleteSelectedRows,
            DeleteSelectedColumns => GridMsg::DeleteSelectedColumns,

            Unbound => return None,
        };
        Some(msg)
    }

    pub fn name(self) -> &'static str {
        use Command::*;

        match self {
            MoveUp => "MoveUp",
            MoveDown => "MoveDown",
            MoveLeft => "MoveLeft",
            MoveRight => "MoveRight",
            ExtendUp => "ExtendUp",
            ExtendDown => "ExtendDown",
            ExtendLeft => "ExtendLeft",
            ExtendRight => "ExtendRight",
            JumpUp => "JumpUp",
            JumpDown => "JumpDown",
            JumpLeft => "JumpLeft",
            JumpRight => "JumpRight",
            ExtendToEdgeUp => "ExtendToEdgeUp",
            ExtendToEdgeDown => "ExtendToEdgeDown",
            ExtendToEdgeLeft => "ExtendToEdgeLeft",
            ExtendToEdgeRight => "ExtendToEdgeRight",
            NextCell => "NextCell",
            PrevCell => "PrevCell",
            Deactivate => "Deactivate",
            StartEditing => "StartEditing",
            ClearCell => "ClearCell",
            ConfirmEdit => "ConfirmEdit",
            ConfirmEditUp => "ConfirmEditUp",
            ConfirmEditNext => "ConfirmEditNext",
            ConfirmEditPrev => "ConfirmEditPrev",
            CancelEdit => "CancelEdit",
            EditDeleteBackward => "EditDeleteBackward",
            EditDeleteForward => "EditDeleteForward",
            EditCursorLeft => "EditCursorLeft",
            EditCursorRight => "EditCursorRight",
            EditCursorHome => "EditCursorHome",
            EditCursorEnd => "EditCursorEnd",
            Copy => "Copy",
            Paste => "Paste",
            InsertRowBelow => "InsertRowBelow",
            InsertColumnRight => "InsertColumnRight",
            DeleteSelectedRows => "DeleteSelectedRows",
            DeleteSelectedColumns => "DeleteSelectedColumns",
            Unbound => "Unbound",
        }
    }

    pub const ALL: [Command; 39] = [
        Command::MoveUp,
        Command::MoveDown,
        Command::MoveLeft,
        Command::MoveRight,
        Command::ExtendUp,
        Command::ExtendDown,
        Command::ExtendLeft,
        Command::ExtendRight,
        Command::JumpUp,
        Command::JumpDown,
        Command::JumpLeft,
        Command::JumpRight,
        Command::ExtendToEdgeUp,
        Command::ExtendToEdgeDown,
        Command::ExtendToEdgeLeft,
        Command::ExtendToEdgeRight,
        Command::NextCell,
        Command::PrevCell,
        Command::Deactivate,
        Command::StartEditing,
        Command::ClearCell,
        Command::ConfirmEdit,
        Command::ConfirmEditUp,
        Command::ConfirmEditNext,
        Command::ConfirmEditPrev,
        Command::CancelEdit,
        Command::EditDeleteBackward,
        Command::EditDeleteForward,
        Command::EditCursorLeft,
        Command::EditCursorRight,
        Command::EditCursorHome,
        Command::EditCursorEnd,
        Command::Copy,
        Command::Paste,
        Command::InsertRowBelow,
        Command::InsertColumnRight,
        Command::DeleteSelectedRows,
        Command::DeleteSelectedColumns,
        Command::Unbound,
    ];
}

/// Accepts `PascalCase` names and their `snake_case` spelling
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        Command::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(&wanted))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.name().parse::<Command>(), Ok(cmd));
        }
    }

    #[test]
    fn test_from_str_snake_case() {
        assert_eq!("extend_to_edge_down".parse(), Ok(Command::ExtendToEdgeDown));
        assert_eq!("confirm_edit".parse(), Ok(Command::ConfirmEdit));
        assert!("save_file".parse::<Command>().is_err());
    }

    #[test]
    fn test_to_msg() {
        assert_eq!(Command::JumpDown.to_msg(), Some(GridMsg::Jump(Direction::Down)));
        assert_eq!(Command::Paste.to_msg(), Some(GridMsg::PasteFromClipboard));
        assert_eq!(Command::Unbound.to_msg(), None);
    }
}
