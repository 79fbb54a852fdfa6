//! Error type for gateway operations.
//!
//! Every variant maps to one stable failure code that the host runtime sees.
//! Adapters map `EsimError` to their own shapes (`HostError`, CLI exit codes).

use thiserror::Error;

use crate::domain::ApiLevel;
use crate::ports::PlatformError;
use crate::settings::SettingsError;

/// Semantic failures of the eSIM gateway.
#[derive(Debug, Error)]
pub enum EsimError {
    /// `READ_PHONE_STATE` is not granted.
    #[error("read_phone_state permission is required")]
    PermissionDenied,

    /// The running platform is below the floor of a required capability.
    #[error("{} or higher is required", describe_level(*required))]
    VersionNotSupported { required: ApiLevel, actual: ApiLevel },

    /// The eUICC service is missing or administratively disabled.
    #[error("eSIM is not supported or enabled on this device")]
    NotSupported,

    #[error("Activation code is required")]
    InvalidActivationCode,

    /// No foreground activity to launch the OS installation flow into.
    #[error("No current activity available")]
    NoActivity,

    /// Every launch strategy failed; carries the last strategy's error.
    #[error("Could not open any settings page: {detail}")]
    SettingsFailed { detail: String },

    /// Gateway settings were rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Unexpected platform failure.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

fn describe_level(level: ApiLevel) -> String {
    match level.release_name() {
        Some(release) => format!("Android {release} (API {})", level.get()),
        None => format!("Android API {}", level.get()),
    }
}

impl EsimError {
    /// Failure code reported to the host runtime.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::VersionNotSupported { .. } => "VERSION_NOT_SUPPORTED",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::InvalidActivationCode => "INVALID_ACTIVATION_CODE",
            Self::NoActivity => "NO_ACTIVITY",
            Self::SettingsFailed { .. } => "SETTINGS_FAILED",
            Self::Settings(_) | Self::Platform(_) => "ERROR",
        }
    }
}
