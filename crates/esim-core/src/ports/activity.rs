//! Foreground UI port used to launch OS screens.

use super::PlatformError;
use crate::domain::IntentSpec;

/// Access to the host's foreground activity.
#[cfg_attr(test, mockall::automock)]
pub trait ActivityPort: Send + Sync {
    /// Whether a foreground activity is available to launch from.
    fn has_foreground_activity(&self) -> bool;

    /// Start `intent` from the foreground activity.
    ///
    /// Returns once the launch request is accepted; there is no signal about
    /// what the user does in the launched screen.
    fn start_activity(&self, intent: &IntentSpec) -> Result<(), PlatformError>;
}
