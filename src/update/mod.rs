//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod grid;

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::GridModel;

#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use grid::update_grid;

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        grid::update_grid(model, msg)
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs the diff.
/// Pointer moves during a resize are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    let is_noisy = matches!(&msg, GridMsg::PointerMove { .. });

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = GridSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = grid::update_grid(model, msg);

    let after = GridSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    result
}

/// Display name for a message, with long payloads abbreviated
#[cfg(debug_assertions)]
fn msg_type_name(msg: &GridMsg) -> String {
    match msg {
        GridMsg::Paste(text) => format!("Paste({} chars)", text.chars().count()),
        GridMsg::Load(doc) => format!("Load({} bytes)", doc.data.len()),
        other => format!("{:?}", other),
    }
}
