//! Domain types for the eSIM bridge.
//!
//! These are pure data types with no platform dependencies. Views handed to
//! the host (`EsimInfo`, `CellularPlan`) are rebuilt from live platform state
//! on every call and never cached.

mod install;
mod intent;
mod subscription;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use install::{ActivationCode, InstallOutcome, InstallRequest};
pub use intent::{FLAG_ACTIVITY_NEW_TASK, IntentExtra, IntentSpec};
pub use subscription::{CarrierIdentity, CellularPlan, EsimInfo, SubscriptionRecord};

/// Android platform version (`Build.VERSION.SDK_INT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// Android 5.1, first release with `SubscriptionManager`.
    pub const LOLLIPOP_MR1: Self = Self(22);

    /// Android 9, first release with `EuiccManager` and `SubscriptionInfo.isEmbedded`.
    pub const P: Self = Self(28);

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Marketing version of the release that introduced this level.
    pub const fn release_name(self) -> Option<&'static str> {
        match self.0 {
            21 => Some("5.0"),
            22 => Some("5.1"),
            23 => Some("6.0"),
            24 => Some("7.0"),
            25 => Some("7.1"),
            26 => Some("8.0"),
            27 => Some("8.1"),
            28 => Some("9.0"),
            29 => Some("10"),
            30 => Some("11"),
            31 => Some("12"),
            32 => Some("12L"),
            33 => Some("13"),
            34 => Some("14"),
            35 => Some("15"),
            _ => None,
        }
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

/// Availability of the eUICC management service (`EuiccManager`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EuiccState {
    /// `getSystemService(EUICC_SERVICE)` returned nothing.
    Absent,
    /// The service exists but `isEnabled()` is false.
    Disabled,
    Enabled,
}

impl EuiccState {
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_level_ordering() {
        assert!(ApiLevel(21) < ApiLevel::LOLLIPOP_MR1);
        assert!(ApiLevel::LOLLIPOP_MR1 < ApiLevel::P);
        assert_eq!(ApiLevel::P.to_string(), "API 28");
        assert_eq!(ApiLevel::P.release_name(), Some("9.0"));
        assert_eq!(ApiLevel(99).release_name(), None);
    }

    #[test]
    fn test_euicc_state_serialization() {
        let json = serde_json::to_string(&EuiccState::Disabled).unwrap();
        assert_eq!(json, "\"disabled\"");
        assert!(EuiccState::Enabled.is_enabled());
        assert!(!EuiccState::Absent.is_enabled());
    }
}
