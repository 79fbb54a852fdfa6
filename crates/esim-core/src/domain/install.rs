//! Input and outcome types for `installEsimProfile`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EsimError;
use crate::launch::LaunchStrategy;

/// Installation request as sent by the host.
///
/// `activation_code` is optional on the wire so that a missing or `null`
/// code reaches the gateway and is rejected there with
/// `INVALID_ACTIVATION_CODE` instead of failing request decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    #[serde(default)]
    pub activation_code: Option<String>,
    /// Accepted for call-shape compatibility; Android's public API has no
    /// place to forward it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
}

impl InstallRequest {
    pub fn new(activation_code: impl Into<String>) -> Self {
        Self {
            activation_code: Some(activation_code.into()),
            confirmation_code: None,
        }
    }
}

/// A carrier activation code known to be non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn parse(raw: Option<&str>) -> Result<Self, EsimError> {
        match raw {
            Some(code) if !code.is_empty() => Ok(Self(code.to_string())),
            _ => Err(EsimError::InvalidActivationCode),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Activation codes carry carrier secrets; keep them out of debug logs.
impl fmt::Debug for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivationCode(<{} chars>)", self.0.chars().count())
    }
}

/// Outcome of a successful install call.
///
/// Success means an OS screen was launched, nothing more: the platform gives
/// no signal about whether the user finished the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallOutcome {
    pub launched: LaunchStrategy,
    /// Number of strategies tried, including the one that launched.
    pub attempts: usize,
}
