//! Gateway settings and validation.
//!
//! Pure configuration types; loading them from files or the environment is
//! left to adapters.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::launch::LaunchStrategy;

/// Label shown by the OS clipboard UI for the copied activation code.
pub const DEFAULT_CLIPBOARD_LABEL: &str = "eSIM Activation Code";

/// Tunables of `EsimGateway`.
///
/// Keys are camelCase, like the rest of the host-facing JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewaySettings {
    /// Label attached to the clipboard entry holding the activation code.
    pub clipboard_label: String,

    /// Whether the activation code is copied before launching.
    pub copy_to_clipboard: bool,

    /// Launch strategies in the order they are tried.
    pub launch_order: Vec<LaunchStrategy>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            clipboard_label: DEFAULT_CLIPBOARD_LABEL.to_string(),
            copy_to_clipboard: true,
            launch_order: LaunchStrategy::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Launch order must contain at least one strategy")]
    EmptyLaunchOrder,

    #[error("Launch strategy listed more than once: {0}")]
    DuplicateStrategy(LaunchStrategy),

    #[error("Clipboard label cannot be empty")]
    EmptyClipboardLabel,
}

/// Validate settings values.
pub fn validate_settings(settings: &GatewaySettings) -> Result<(), SettingsError> {
    if settings.launch_order.is_empty() {
        return Err(SettingsError::EmptyLaunchOrder);
    }

    let mut seen = HashSet::new();
    for strategy in &settings.launch_order {
        if !seen.insert(*strategy) {
            return Err(SettingsError::DuplicateStrategy(*strategy));
        }
    }

    if settings.copy_to_clipboard && settings.clipboard_label.trim().is_empty() {
        return Err(SettingsError::EmptyClipboardLabel);
    }

    Ok(())
}
