//! Terminal clipboard via the OSC 52 escape sequence.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use prepsets_core::clipboard::Clipboard;
use prepsets_core::error::{PrepError, Result};
use std::io::{IsTerminal, Write};

/// Asks the terminal emulator to place text on the system clipboard.
///
/// Only works when stdout is a terminal that honours OSC 52; elsewhere the
/// copy fails and the caller carries on.
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl Clipboard for Osc52Clipboard {
    fn copy_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(PrepError::clipboard("stdout is not a terminal"));
        }
        stdout.write_all(Self::sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
