//! Decoding of host requests into typed calls.

use esim_core::InstallRequest;
use serde::Deserialize;
use serde_json::Value;

use crate::error::HostError;

/// One call from the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    CheckPermission,
    IsEsimSupported,
    IsEsimEnabled,
    GetEsimInfo,
    InstallEsimProfile(InstallRequest),
    GetCellularPlans,
}

/// Wire envelope: `{"method": "...", "params": {...}}`.
#[derive(Debug, Deserialize)]
struct RawRequest {
    method: String,
    #[serde(default)]
    params: Value,
}

impl HostCall {
    /// Method name as the host spells it.
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::CheckPermission => "checkPermission",
            Self::IsEsimSupported => "isEsimSupported",
            Self::IsEsimEnabled => "isEsimEnabled",
            Self::GetEsimInfo => "getEsimInfo",
            Self::InstallEsimProfile(_) => "installEsimProfile",
            Self::GetCellularPlans => "getCellularPlans",
        }
    }

    /// Build a call from a method name and its params.
    ///
    /// `requestPermissions` is accepted as the older name of
    /// `checkPermission`; it only reports the grant state.
    pub fn from_parts(method: &str, params: Value) -> Result<Self, HostError> {
        let call = match method {
            "checkPermission" | "requestPermissions" => Self::CheckPermission,
            "isEsimSupported" => Self::IsEsimSupported,
            "isEsimEnabled" => Self::IsEsimEnabled,
            "getEsimInfo" => Self::GetEsimInfo,
            "getCellularPlans" => Self::GetCellularPlans,
            "installEsimProfile" => {
                let request = if params.is_null() {
                    InstallRequest::default()
                } else {
                    serde_json::from_value(params)?
                };
                Self::InstallEsimProfile(request)
            }
            other => {
                return Err(HostError::invalid_request(format!(
                    "unknown method: {other}"
                )));
            }
        };
        Ok(call)
    }

    /// Decode a JSON request.
    pub fn from_json(request: &str) -> Result<Self, HostError> {
        let raw: RawRequest = serde_json::from_str(request)?;
        Self::from_parts(&raw.method, raw.params)
    }
}
