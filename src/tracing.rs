//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! navigation, editing and mutation issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid=debug,message=debug` - scoped filtering
//! - `RUST_LOG=gridblock::grid::mutation=debug` - module-level filtering
//!
//! The library never installs a subscriber itself; hosts call [`init`] or
//! [`init_with_log_dir`] once at startup.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::CellPosition;
use crate::model::GridModel;

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize a console subscriber that respects RUST_LOG (default `warn`)
pub fn init() {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter());

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}

/// Console logging plus a daily-rotated debug log under `logs_dir`
pub fn init_with_log_dir(logs_dir: &Path) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter());

    // File layer - always debug level for troubleshooting
    let file_layer = match std::fs::create_dir_all(logs_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "gridblock.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub active: Option<CellPosition>,
    pub focus: Option<CellPosition>,
    pub editing: bool,
    pub rows: usize,
    pub cols: usize,
    pub resizing: bool,
}

impl GridSnapshot {
    pub fn from_model(model: &GridModel) -> Self {
        let dims = model.dimensions();
        Self {
            active: model.state.active_cell,
            focus: model.state.focus,
            editing: model.state.is_editing(),
            rows: dims.rows,
            cols: dims.cols,
            resizing: model.resize.is_some(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.rows != other.rows || self.cols != other.cols {
            changes.push(format!(
                "shape: {}x{} → {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ));
        }
        if self.active != other.active {
            changes.push(format!(
                "active: {} → {}",
                describe(self.active),
                describe(other.active)
            ));
        }
        if self.focus != other.focus {
            changes.push(format!(
                "focus: {} → {}",
                describe(self.focus),
                describe(other.focus)
            ));
        }
        if self.editing != other.editing {
            let status = if other.editing { "started" } else { "ended" };
            changes.push(format!("edit {}", status));
        }
        if self.resizing != other.resizing {
            let status = if other.resizing { "started" } else { "ended" };
            changes.push(format!("resize {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(pos: Option<CellPosition>) -> String {
    pos.map_or_else(|| "none".to_string(), |p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let mut model = GridModel::from_text("A\tB\nx\t1");
        let before = GridSnapshot::from_model(&model);
        assert_eq!(before.diff(&before), None);

        model.state.activate_at(CellPosition::new(0, 1));
        let after = GridSnapshot::from_model(&model);
        let diff = before.diff(&after).unwrap();
        assert!(diff.starts_with("active: none"));
    }
}
