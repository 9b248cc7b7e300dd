//! Clipboard abstraction.

use crate::error::Result;

/// Write-only access to the system clipboard.
///
/// Failures are reported to the caller, which ignores them: a missing
/// clipboard never interrupts the session.
pub trait Clipboard: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<()>;
}
