//! Dispatch of host calls onto the gateway.

use esim_core::{EsimError, EsimGateway};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::call::HostCall;
use crate::error::HostError;

const SERIALIZATION_FAILURE: &str =
    r#"{"ok":false,"error":{"code":"ERROR","message":"response serialization failed"}}"#;

/// Response envelope returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<HostError>,
}

impl From<Result<Value, HostError>> for HostResponse {
    fn from(result: Result<Value, HostError>) -> Self {
        match result {
            Ok(value) => Self {
                ok: true,
                value: Some(value),
                error: None,
            },
            Err(error) => Self::failure(error),
        }
    }
}

impl HostResponse {
    pub const fn failure(error: HostError) -> Self {
        Self {
            ok: false,
            value: None,
            error: Some(error),
        }
    }

    /// Encode for the host; never fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!(error = %e, "failed to serialize host response");
            SERIALIZATION_FAILURE.to_string()
        })
    }
}

/// Entry point used by host adapters (JNI, CLI).
pub struct HostBridge {
    gateway: EsimGateway,
}

impl HostBridge {
    pub const fn new(gateway: EsimGateway) -> Self {
        Self { gateway }
    }

    pub const fn gateway(&self) -> &EsimGateway {
        &self.gateway
    }

    /// Run one call and encode its result as the host expects it.
    pub fn dispatch(&self, call: &HostCall) -> Result<Value, HostError> {
        let method = call.method_name();
        debug!(method, "host call");

        let result = match call {
            HostCall::CheckPermission => Ok(Value::Bool(self.gateway.check_permission())),
            HostCall::IsEsimSupported => encode(self.gateway.is_esim_supported()),
            HostCall::IsEsimEnabled => encode(self.gateway.is_esim_enabled()),
            HostCall::GetEsimInfo => encode(self.gateway.esim_info()),
            HostCall::GetCellularPlans => encode(self.gateway.cellular_plans()),
            // The host only learns that a screen was launched.
            HostCall::InstallEsimProfile(request) => {
                encode(self.gateway.install_esim_profile(request).map(|_| true))
            }
        };

        result.inspect_err(|e| log_failure(method, e))
    }

    /// Decode, dispatch and wrap one request.
    pub fn handle_request(&self, request: &str) -> HostResponse {
        HostCall::from_json(request)
            .inspect_err(|e| log_failure("<decode>", e))
            .and_then(|call| self.dispatch(&call))
            .into()
    }

    /// Same as `handle_request`, serialized to a JSON string.
    pub fn handle_json(&self, request: &str) -> String {
        self.handle_request(request).to_json()
    }
}

fn encode<T: Serialize>(result: Result<T, EsimError>) -> Result<Value, HostError> {
    let value = result?;
    Ok(serde_json::to_value(value)?)
}

fn log_failure(method: &str, error: &HostError) {
    if error.code == "ERROR" || error.code == crate::error::INVALID_REQUEST {
        warn!(method, code = %error.code, message = %error.message, "host call failed");
    } else {
        debug!(method, code = %error.code, "host call rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esim_core::testing::{FakePlatform, subscription};
    use esim_core::{GatewaySettings, PlatformError};
    use serde_json::json;

    fn bridge(fake: FakePlatform) -> HostBridge {
        let (_, platform) = fake.into_platform();
        HostBridge::new(EsimGateway::new(platform, GatewaySettings::default()).unwrap())
    }

    #[test]
    fn test_esim_info_value_shape() {
        let bridge = bridge(
            FakePlatform::new().with_subscription(subscription(4, "Airalo", Some(true))),
        );
        let value = bridge.dispatch(&HostCall::GetEsimInfo).unwrap();
        assert_eq!(
            value,
            json!({
                "isEsimSupported": true,
                "isEsimEnabled": true,
                "carrierName": "Airalo",
                "mobileCountryCode": "310",
                "mobileNetworkCode": "264"
            })
        );
    }

    #[test]
    fn test_install_success_is_plain_true() {
        let bridge = bridge(FakePlatform::new());
        let value = bridge
            .dispatch(&HostCall::InstallEsimProfile(
                esim_core::InstallRequest::new("LPA:1$a$b"),
            ))
            .unwrap();
        assert_eq!(value, json!(true));
    }

    #[test]
    fn test_handle_json_wraps_errors() {
        let bridge = bridge(FakePlatform::new().with_permission(false));
        let response: HostResponse =
            serde_json::from_str(&bridge.handle_json(r#"{"method":"getCellularPlans"}"#))
                .unwrap();
        assert!(!response.ok);
        assert!(response.value.is_none());
        assert_eq!(response.error.unwrap().code, "PERMISSION_DENIED");
    }

    #[test]
    fn test_handle_json_wraps_values() {
        let bridge = bridge(FakePlatform::new());
        let json = bridge.handle_json(r#"{"method":"checkPermission"}"#);
        assert_eq!(json, r#"{"ok":true,"value":true}"#);
    }

    #[test]
    fn test_failure_envelope_json() {
        let response = HostResponse::failure(HostError::new("ERROR", "not initialized"));
        assert_eq!(
            response.to_json(),
            r#"{"ok":false,"error":{"code":"ERROR","message":"not initialized"}}"#
        );
    }

    #[test]
    fn test_handle_json_reports_decode_failures() {
        let bridge = bridge(FakePlatform::new());
        let response = bridge.handle_request("{");
        assert_eq!(response.error.unwrap().code, "INVALID_REQUEST");
    }

    #[test]
    fn test_platform_failure_becomes_generic_error() {
        let bridge = bridge(
            FakePlatform::new()
                .with_subscription_error(PlatformError::Unavailable("telephony".into())),
        );
        let err = bridge.dispatch(&HostCall::IsEsimEnabled).unwrap_err();
        assert_eq!(err.code, "ERROR");
        assert_eq!(err.message, "Platform unavailable: telephony");
    }
}
