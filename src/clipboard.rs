//! Clipboard access.
//!
//! The terminal clipboard is reached through the OSC 52 escape sequence,
//! which most modern terminal emulators (and tmux with `set-clipboard on`)
//! forward to the system clipboard. No display server connection is needed.

use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Errors that can occur while copying.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to write to the terminal: {0}")]
    Io(#[from] io::Error),

    #[error("Clipboard is disabled")]
    Disabled,
}

/// Something text can be copied to.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through an OSC 52 sequence written to `W` (normally stdout).
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps the copied text in memory. Used when the terminal clipboard is
/// turned off, and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    /// When set, every copy fails with `ClipboardError::Disabled`.
    pub reject: bool,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::Disabled);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
