//! Capability floors keyed by Android API level.
//!
//! Each platform feature the gateway touches is declared once here with the
//! first API level that provides it. Gateway code asks the table instead of
//! comparing `SDK_INT` values inline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::ApiLevel;
use crate::error::EsimError;

/// A version-gated platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// `SubscriptionManager.getActiveSubscriptionInfoList`.
    SubscriptionList,
    /// `SubscriptionInfo.isEmbedded`.
    EmbeddedFlag,
    /// Probing whether the device can host an eSIM at all.
    EsimSupportProbe,
    /// `EuiccManager` and the provisioning intents.
    EuiccManagement,
}

impl Capability {
    pub const ALL: [Self; 4] = [
        Self::SubscriptionList,
        Self::EmbeddedFlag,
        Self::EsimSupportProbe,
        Self::EuiccManagement,
    ];

    /// Floor used by the default table.
    pub const fn default_floor(self) -> ApiLevel {
        match self {
            Self::SubscriptionList => ApiLevel::LOLLIPOP_MR1,
            Self::EmbeddedFlag | Self::EsimSupportProbe | Self::EuiccManagement => ApiLevel::P,
        }
    }
}

/// Lookup of capability floors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTable {
    floors: BTreeMap<Capability, ApiLevel>,
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self {
            floors: Capability::ALL
                .into_iter()
                .map(|cap| (cap, cap.default_floor()))
                .collect(),
        }
    }
}

impl CapabilityTable {
    /// Replace the floor of one capability.
    #[must_use]
    pub fn with_floor(mut self, capability: Capability, floor: ApiLevel) -> Self {
        self.floors.insert(capability, floor);
        self
    }

    pub fn floor(&self, capability: Capability) -> ApiLevel {
        self.floors
            .get(&capability)
            .copied()
            .unwrap_or_else(|| capability.default_floor())
    }

    pub fn is_available(&self, capability: Capability, level: ApiLevel) -> bool {
        level >= self.floor(capability)
    }

    /// Fail with `VersionNotSupported` when `level` is below the floor.
    pub fn require(&self, capability: Capability, level: ApiLevel) -> Result<(), EsimError> {
        if self.is_available(capability, level) {
            Ok(())
        } else {
            Err(EsimError::VersionNotSupported {
                required: self.floor(capability),
                actual: level,
            })
        }
    }
}
