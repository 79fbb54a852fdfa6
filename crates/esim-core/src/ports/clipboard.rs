//! Clipboard port.

use super::PlatformError;

pub trait ClipboardPort: Send + Sync {
    /// Replace the primary clip with `text` under a user-visible `label`.
    fn set_plain_text(&self, label: &str, text: &str) -> Result<(), PlatformError>;
}
