//! System screens tried when installing an eSIM profile.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{ActivationCode, FLAG_ACTIVITY_NEW_TASK, IntentExtra, IntentSpec};

pub const ACTION_PROVISION_EMBEDDED_SUBSCRIPTION: &str =
    "android.telephony.euicc.action.PROVISION_EMBEDDED_SUBSCRIPTION";
pub const EXTRA_EMBEDDED_SUBSCRIPTION_DOWNLOADABLE_SUBSCRIPTION: &str =
    "android.telephony.euicc.extra.EMBEDDED_SUBSCRIPTION_DOWNLOADABLE_SUBSCRIPTION";
pub const ACTION_EUICC_SETTINGS: &str = "android.settings.EUICC_SETTINGS";
pub const ACTION_SIM_SETTINGS: &str = "android.settings.SIM_SETTINGS";
pub const EXTRA_SIM_STATE: &str = "android.provider.extra.SIM_STATE";
pub const ACTION_WIRELESS_SETTINGS: &str = "android.settings.WIRELESS_SETTINGS";
pub const EXTRA_SHOW_FRAGMENT: &str = ":settings:show_fragment";
pub const SIM_SETTINGS_FRAGMENT: &str = "com.android.settings.sim.SimSettings";

/// One way of getting the user into the OS eSIM installation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchStrategy {
    /// Direct provisioning intent carrying a `DownloadableSubscription`.
    ProvisionEmbeddedSubscription,
    /// Dedicated eUICC settings screen.
    EuiccSettings,
    /// SIM settings asked to start the "add SIM" flow.
    SimSettingsAddSim,
    /// Wireless settings opened on the SIM fragment; last resort.
    WirelessSettings,
}

impl LaunchStrategy {
    /// Order in which strategies are tried by default.
    pub const DEFAULT_ORDER: [Self; 4] = [
        Self::ProvisionEmbeddedSubscription,
        Self::EuiccSettings,
        Self::SimSettingsAddSim,
        Self::WirelessSettings,
    ];

    /// Intent fired for this strategy.
    pub fn intent(self, code: &ActivationCode) -> IntentSpec {
        let intent = match self {
            Self::ProvisionEmbeddedSubscription => IntentSpec::new(
                ACTION_PROVISION_EMBEDDED_SUBSCRIPTION,
            )
            .with_extra(
                EXTRA_EMBEDDED_SUBSCRIPTION_DOWNLOADABLE_SUBSCRIPTION,
                IntentExtra::DownloadableSubscription {
                    activation_code: code.as_str().to_string(),
                },
            ),
            Self::EuiccSettings => IntentSpec::new(ACTION_EUICC_SETTINGS),
            Self::SimSettingsAddSim => IntentSpec::new(ACTION_SIM_SETTINGS)
                .with_extra(EXTRA_SIM_STATE, IntentExtra::Text("ADD_SIM".to_string())),
            Self::WirelessSettings => IntentSpec::new(ACTION_WIRELESS_SETTINGS).with_extra(
                EXTRA_SHOW_FRAGMENT,
                IntentExtra::Text(SIM_SETTINGS_FRAGMENT.to_string()),
            ),
        };
        intent.with_flags(FLAG_ACTIVITY_NEW_TASK)
    }
}

impl fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProvisionEmbeddedSubscription => "provision_embedded_subscription",
            Self::EuiccSettings => "euicc_settings",
            Self::SimSettingsAddSim => "sim_settings_add_sim",
            Self::WirelessSettings => "wireless_settings",
        };
        f.write_str(name)
    }
}
