//! Gridblock - editable data grid for report blocks
//!
//! This crate provides the core types and logic for a keyboard-driven data
//! grid whose only durable state is a delimited-text blob plus per-column
//! metadata, implementing the Elm Architecture pattern.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod grid;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::{GridConfig, LocaleConfig};
pub use grid::{GridDocument, GridEdit, Matrix};
pub use messages::GridMsg;
pub use model::GridModel;
pub use update::update;
