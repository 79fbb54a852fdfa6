//! CLI-specific error types and mappings.
//!
//! Maps gateway and host failures onto exit codes and user-facing messages.

use esim_core::{EsimError, SettingsError};
use esim_host::HostError;
use esim_host::error::INVALID_REQUEST;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A gateway call was rejected; carries the host error code.
    #[error("{message} ({code})")]
    Gateway { code: String, message: String },

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error (profile or settings file).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions (see sysexits.h). Usage errors never
    /// get here; clap exits with 2 itself.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Gateway { code, .. } => match code.as_str() {
                "INVALID_ACTIVATION_CODE" | INVALID_REQUEST => 65, // EX_DATAERR
                "PERMISSION_DENIED" => 77,                         // EX_NOPERM
                "NOT_SUPPORTED" | "VERSION_NOT_SUPPORTED" | "NO_ACTIVITY" => 69, // EX_UNAVAILABLE
                _ => 1,
            },
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<HostError> for CliError {
    fn from(err: HostError) -> Self {
        Self::Gateway {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<EsimError> for CliError {
    fn from(err: EsimError) -> Self {
        match err {
            EsimError::Settings(settings) => settings.into(),
            other => HostError::from(other).into(),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
