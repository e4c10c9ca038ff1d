//! Configurable keyboard mapping for the grid
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes to grid commands
//! - Resolves the same key differently while navigating and while editing
//! - Uses Cmd on macOS and Ctrl elsewhere as the jump modifier
//! - Accepts overrides from YAML
//!
//! # Architecture
//!
//! ```text
//! KeyPress → Keystroke → Keymap::lookup() → Command → GridMsg
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{
    bindings_from_config, load_keymap_file, parse_key_string, parse_keymap_yaml, BindingConfig,
    KeymapError,
};
pub use context::{Condition, KeyContext};
pub use defaults::{default_bindings, load_keymap, merge_bindings};
pub use keymap::Keymap;
pub use types::{KeyCode, KeyPress, Keystroke, Modifiers};
