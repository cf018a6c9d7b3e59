//! System clipboard access for the copy-id action
//!
//! `arboard` handles Windows, macOS and X11/Wayland. A fresh handle is opened
//! per copy; copies are rare and a held handle can block other apps on X11.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put `text` on the system clipboard
///
/// Fails without a display server (SSH sessions, bare consoles).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .context("Failed to access clipboard")?
        .set_text(text.to_owned())
        .with_context(|| format!("Failed to copy {:?} to clipboard", text))
}
