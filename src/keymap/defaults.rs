//! Default keybindings for the grid
//!
//! Range modifier is Shift, jump modifier is the platform command key
//! (Cmd on macOS, Ctrl elsewhere), and F2 opens the cell editor.

use super::binding::Keybinding;
use super::command::Command;
use super::config::{bindings_from_config, BindingConfig};
use super::context::Condition;
use super::keymap::Keymap;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keybindings for the current platform
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let shift = Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let arrows = [
        (KeyCode::Up, [Command::MoveUp, Command::ExtendUp, Command::JumpUp, Command::ExtendToEdgeUp]),
        (
            KeyCode::Down,
            [Command::MoveDown, Command::ExtendDown, Command::JumpDown, Command::ExtendToEdgeDown],
        ),
        (
            KeyCode::Left,
            [Command::MoveLeft, Command::ExtendLeft, Command::JumpLeft, Command::ExtendToEdgeLeft],
        ),
        (
            KeyCode::Right,
            [
                Command::MoveRight,
                Command::ExtendRight,
                Command::JumpRight,
                Command::ExtendToEdgeRight,
            ],
        ),
    ];

    let mut bindings = Vec::new();

    // ====================================================================
    // Navigation
    // ====================================================================
    for (key, [step, extend, jump, extend_edge]) in arrows {
        bindings.push(nav(key, none, step));
        bindings.push(nav(key, shift, extend));
        bindings.push(nav(key, cmd, jump));
        bindings.push(nav(key, cmd_shift, extend_edge));
    }
    bindings.extend([
        nav(KeyCode::Tab, none, Command::NextCell),
        nav(KeyCode::Tab, shift, Command::PrevCell),
        nav(KeyCode::Enter, none, Command::StartEditing),
        nav(KeyCode::F(2), none, Command::StartEditing),
        nav(KeyCode::Backspace, none, Command::ClearCell),
        nav(KeyCode::Delete, none, Command::ClearCell),
        nav(KeyCode::Escape, none, Command::Deactivate),
    ]);

    // ====================================================================
    // Cell editing
    // ====================================================================
    bindings.extend([
        edit(KeyCode::Enter, none, Command::ConfirmEdit),
        edit(KeyCode::Enter, shift, Command::ConfirmEditUp),
        edit(KeyCode::Tab, none, Command::ConfirmEditNext),
        edit(KeyCode::Tab, shift, Command::ConfirmEditPrev),
        edit(KeyCode::Escape, none, Command::CancelEdit),
        edit(KeyCode::Backspace, none, Command::EditDeleteBackward),
        edit(KeyCode::Delete, none, Command::EditDeleteForward),
        edit(KeyCode::Left, none, Command::EditCursorLeft),
        edit(KeyCode::Right, none, Command::EditCursorRight),
        edit(KeyCode::Home, none, Command::EditCursorHome),
        edit(KeyCode::End, none, Command::EditCursorEnd),
    ]);

    // ====================================================================
    // Clipboard and structure
    // ====================================================================
    bindings.extend([
        bind(KeyCode::Char('c'), cmd, Command::Copy),
        bind(KeyCode::Char('v'), cmd, Command::Paste),
        nav(KeyCode::Enter, cmd, Command::InsertRowBelow),
        nav(KeyCode::Enter, cmd_shift, Command::InsertColumnRight),
        nav(KeyCode::Char('-'), cmd, Command::DeleteSelectedRows),
        nav(KeyCode::Char('-'), cmd_shift, Command::DeleteSelectedColumns),
    ]);

    bindings
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

fn nav(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    bind(key, mods, command).when_single(Condition::Navigating)
}

fn edit(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    bind(key, mods, command).when_single(Condition::Editing)
}

/// Merge user bindings over a base set
///
/// A user binding replaces every base binding on the same keystroke, so
/// conditional defaults cannot shadow it. `Unbound` only removes.
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in &user {
        result.retain(|b| b.keystroke != user_binding.keystroke);
    }

    result.extend(
        user.into_iter()
            .filter(|binding| binding.command != Command::Unbound),
    );
    result
}

/// Defaults merged with configured overrides
///
/// Invalid overrides are logged and ignored.
pub fn load_keymap(overrides: &[BindingConfig]) -> Keymap {
    let defaults = default_bindings();
    if overrides.is_empty() {
        return Keymap::with_bindings(defaults);
    }

    match bindings_from_config(overrides) {
        Ok(user) => {
            tracing::info!("Merging {} keymap overrides", user.len());
            Keymap::with_bindings(merge_bindings(defaults, user))
        }
        Err(e) => {
            tracing::warn!("Ignoring keymap overrides: {}", e);
            Keymap::with_bindings(defaults)
        }
    }
}
