//! Simulated devices described by JSON profiles.
//!
//! A profile pins down everything the gateway can observe about a phone. The
//! simulated device answers port calls from it and records the side effects
//! (clipboard writes and launch attempts) so the CLI can show them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use esim_core::{
    ActivityPort, ApiLevel, ClipboardPort, EuiccState, IntentSpec, Platform, PlatformError,
    SubscriptionRecord, TelephonyPort,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// Observable state of a simulated phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub api_level: u32,
    pub permission_granted: bool,
    pub euicc: EuiccState,
    pub euicc_feature: bool,
    pub foreground_activity: bool,
    pub subscriptions: Vec<SubscriptionRecord>,
    /// Intent actions whose launch is refused, with the reported error.
    pub failing_actions: BTreeMap<String, String>,
    pub clipboard_error: Option<String>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            api_level: 34,
            permission_granted: true,
            euicc: EuiccState::Enabled,
            euicc_feature: true,
            foreground_activity: true,
            subscriptions: vec![SubscriptionRecord {
                subscription_id: 1,
                carrier_name: "T-Mobile".to_string(),
                mcc: "310".to_string(),
                mnc: "260".to_string(),
                embedded: Some(false),
            }],
            failing_actions: BTreeMap::new(),
            clipboard_error: None,
        }
    }
}

impl DeviceProfile {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
            .map_err(|e| CliError::Config(format!("invalid profile {}: {e}", path.display())))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Starting point printed by `profile-template`: dual SIM with one eSIM.
    pub fn template() -> Self {
        let mut profile = Self::default();
        profile.subscriptions.push(SubscriptionRecord {
            subscription_id: 2,
            carrier_name: "Airalo".to_string(),
            mcc: "234".to_string(),
            mnc: "15".to_string(),
            embedded: Some(true),
        });
        profile
    }
}

/// One `startActivity` call made against the simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchAttempt {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationRecord {
    pub clipboard: Vec<(String, String)>,
    pub launches: Vec<LaunchAttempt>,
}

/// Port implementation backed by a [`DeviceProfile`].
#[derive(Debug)]
pub struct SimulatedDevice {
    profile: DeviceProfile,
    record: Mutex<SimulationRecord>,
}

impl SimulatedDevice {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            record: Mutex::new(SimulationRecord::default()),
        }
    }

    pub const fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn into_platform(self) -> (Arc<Self>, Platform) {
        let device = Arc::new(self);
        let platform = Platform::from_adapter(Arc::clone(&device));
        (device, platform)
    }

    pub fn record(&self) -> SimulationRecord {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn below_embedded_apis(&self) -> bool {
        self.api_level() < ApiLevel::P
    }
}

impl TelephonyPort for SimulatedDevice {
    fn api_level(&self) -> ApiLevel {
        ApiLevel(self.profile.api_level)
    }

    fn has_phone_state_permission(&self) -> bool {
        self.profile.permission_granted
    }

    fn euicc_state(&self) -> Result<EuiccState, PlatformError> {
        // There is no "euicc" system service before Android 9
        if self.below_embedded_apis() {
            return Ok(EuiccState::Absent);
        }
        Ok(self.profile.euicc)
    }

    fn has_euicc_feature(&self) -> Result<bool, PlatformError> {
        Ok(self.profile.euicc_feature)
    }

    fn active_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, PlatformError> {
        let strip_embedded = self.below_embedded_apis();
        Ok(self
            .profile
            .subscriptions
            .iter()
            .cloned()
            .map(|mut record| {
                if strip_embedded {
                    record.embedded = None;
                }
                record
            })
            .collect())
    }
}

impl ClipboardPort for SimulatedDevice {
    fn set_plain_text(&self, label: &str, text: &str) -> Result<(), PlatformError> {
        if let Some(message) = &self.profile.clipboard_error {
            return Err(PlatformError::call("setPrimaryClip", message.clone()));
        }
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clipboard
            .push((label.to_string(), text.to_string()));
        Ok(())
    }
}

impl ActivityPort for SimulatedDevice {
    fn has_foreground_activity(&self) -> bool {
        self.profile.foreground_activity
    }

    fn start_activity(&self, intent: &IntentSpec) -> Result<(), PlatformError> {
        let error = self.profile.failing_actions.get(&intent.action).cloned();
        debug!(action = %intent.action, refused = error.is_some(), "simulated launch");
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .launches
            .push(LaunchAttempt {
                action: intent.action.clone(),
                error: error.clone(),
            });
        error.map_or(Ok(()), |message| Err(PlatformError::Launch(message)))
    }
}
