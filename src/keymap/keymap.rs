//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Indices into `bindings`; several bindings can share a keystroke
    /// with different conditions
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.command == Command::Unbound {
            return;
        }
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// Find the command bound to a keystroke in the given context
    ///
    /// Bindings with matching conditions win over unconditional ones.
    pub fn lookup(&self, keystroke: &Keystroke, ctx: &KeyContext) -> Option<Command> {
        let indices = self.lookup.get(keystroke)?;

        let conditional = indices.iter().map(|&i| &self.bindings[i]).find(|b| {
            b.when
                .as_deref()
                .is_some_and(|conds| Condition::evaluate_all(conds, ctx))
        });

        conditional
            .or_else(|| {
                indices
                    .iter()
                    .map(|&i| &self.bindings[i])
                    .find(|b| b.when.is_none())
            })
            .map(|b| b.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Keystrokes bound to a command (for hints and menus)
    pub fn keystrokes_for(&self, command: Command) -> Vec<Keystroke> {
        self.bindings
            .iter()
            .filter(|b| b.command == command)
            .map(|b| b.keystroke)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
