//! Telephony port: device version, permission and subscription state.

use super::PlatformError;
use crate::domain::{ApiLevel, EuiccState, SubscriptionRecord};

/// Read-only access to telephony state.
///
/// Implementations must not apply version gating themselves beyond what is
/// needed to avoid calling missing APIs (e.g. reporting `embedded: None`
/// below API 28).
pub trait TelephonyPort: Send + Sync {
    /// Platform version of the running device.
    fn api_level(&self) -> ApiLevel;

    /// Whether `READ_PHONE_STATE` is currently granted.
    fn has_phone_state_permission(&self) -> bool;

    /// State of the eUICC management service.
    fn euicc_state(&self) -> Result<EuiccState, PlatformError>;

    /// Whether `android.hardware.telephony.euicc` is declared by the device.
    fn has_euicc_feature(&self) -> Result<bool, PlatformError>;

    /// Active subscriptions in platform order. A null platform list is empty.
    fn active_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, PlatformError>;
}
