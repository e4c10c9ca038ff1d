//! System clipboard access
//!
//! Backed by `arboard` when the `clipboard` feature is enabled. Without it
//! (or without a display server) reads yield nothing and writes are dropped.

use crate::commands::Cmd;

/// Carry out a command's clipboard write for the host
///
/// Returns whether any text reached the clipboard.
pub fn perform(cmd: &Cmd) -> bool {
    perform_with(cmd, write_text)
}

/// [`perform`] against a caller-supplied writer
pub fn perform_with(cmd: &Cmd, write: impl FnOnce(&str) -> bool) -> bool {
    match cmd.clipboard_text() {
        Some(text) => write(text),
        None => false,
    }
}

/// Current clipboard text, if any
#[cfg(feature = "clipboard")]
pub fn read_text() -> Option<String> {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Clipboard has no text: {}", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            None
        }
    }
}

/// Replace the clipboard text, returning whether it succeeded
#[cfg(feature = "clipboard")]
pub fn write_text(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to write clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}

#[cfg(not(feature = "clipboard"))]
pub fn read_text() -> Option<String> {
    None
}

#[cfg(not(feature = "clipboard"))]
pub fn write_text(_text: &str) -> bool {
    false
}
