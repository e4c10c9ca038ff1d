//! Context system for conditional keybindings
//!
//! The same key means different things while navigating and while editing
//! a cell; conditions pick the binding that applies.

use serde::{Deserialize, Serialize};

/// Grid state relevant to keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Whether a cell edit buffer is live
    pub editing: bool,
    /// Whether a multi-cell range is selected
    pub has_selection: bool,
}

impl KeyContext {
    pub fn navigating() -> Self {
        Self::default()
    }

    pub fn editing() -> Self {
        Self {
            editing: true,
            has_selection: false,
        }
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Active while a cell is being edited
    Editing,
    /// Active while moving between cells
    Navigating,
    HasSelection,
    NoSelection,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::Editing => ctx.editing,
            Condition::Navigating => !ctx.editing,
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_conditions() {
        let nav = KeyContext::navigating();
        assert!(Condition::Navigating.evaluate(&nav));
        assert!(!Condition::Editing.evaluate(&nav));

        let edit = KeyContext::editing();
        assert!(Condition::Editing.evaluate(&edit));
        assert!(!Condition::Navigating.evaluate(&edit));
    }

    #[test]
    fn test_evaluate_all_and_logic() {
        let ctx = KeyContext {
            editing: false,
            has_selection: true,
        };
        assert!(Condition::evaluate_all(&[], &ctx));
        assert!(Condition::evaluate_all(
            &[Condition::Navigating, Condition::HasSelection],
            &ctx
        ));
        assert!(!Condition::evaluate_all(
            &[Condition::Navigating, Condition::NoSelection],
            &ctx
        ));
    }
}
