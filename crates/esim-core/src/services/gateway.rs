//! eSIM gateway - the call surface exposed to the host runtime.
//!
//! Every call reads live platform state through the ports, applies the
//! capability table, and returns a plain view. Nothing is cached between
//! calls.
//!
//! "Supported" has one meaning throughout: the eUICC service is present and
//! enabled, and the device declares `android.hardware.telephony.euicc`.
//! Multi-SIM hardware capability is not consulted.

use tracing::{debug, info, warn};

use crate::capability::{Capability, CapabilityTable};
use crate::domain::{
    ActivationCode, CellularPlan, EsimInfo, InstallOutcome, InstallRequest, SubscriptionRecord,
};
use crate::error::EsimError;
use crate::fallback::FallbackChain;
use crate::launch::LaunchStrategy;
use crate::ports::Platform;
use crate::settings::{GatewaySettings, validate_settings};

/// Service answering the six host calls.
pub struct EsimGateway {
    platform: Platform,
    settings: GatewaySettings,
    capabilities: CapabilityTable,
    launch_chain: FallbackChain<LaunchStrategy>,
}

impl EsimGateway {
    /// Create a gateway; settings are validated first.
    pub fn new(platform: Platform, settings: GatewaySettings) -> Result<Self, EsimError> {
        validate_settings(&settings)?;
        let launch_chain = FallbackChain::new(settings.launch_order.clone());
        Ok(Self {
            platform,
            settings,
            capabilities: CapabilityTable::default(),
            launch_chain,
        })
    }

    /// Replace the capability table.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityTable) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub const fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Whether `READ_PHONE_STATE` is granted. Never fails.
    pub fn check_permission(&self) -> bool {
        self.platform.telephony.has_phone_state_permission()
    }

    /// Whether this device can host an eSIM.
    pub fn is_esim_supported(&self) -> Result<bool, EsimError> {
        let telephony = &self.platform.telephony;
        let level = telephony.api_level();
        if !self
            .capabilities
            .is_available(Capability::EsimSupportProbe, level)
        {
            debug!(%level, "eSIM support probe below capability floor");
            return Ok(false);
        }

        if !telephony.euicc_state()?.is_enabled() {
            return Ok(false);
        }

        Ok(telephony.has_euicc_feature()?)
    }

    /// Whether at least one active subscription is embedded.
    pub fn is_esim_enabled(&self) -> Result<bool, EsimError> {
        self.require_permission()?;
        Ok(self.first_embedded_subscription()?.is_some())
    }

    /// Support flag plus carrier details of the first embedded subscription.
    ///
    /// Without the permission the enumeration is skipped, so the result
    /// reports `is_esim_enabled: false` and no carrier fields.
    pub fn esim_info(&self) -> Result<EsimInfo, EsimError> {
        let is_esim_supported = self.is_esim_supported()?;

        let carrier = if self.check_permission() {
            self.first_embedded_subscription()?
                .map(|record| record.carrier_identity())
        } else {
            debug!("phone state permission missing; skipping subscription scan");
            None
        };

        Ok(EsimInfo {
            is_esim_supported,
            is_esim_enabled: carrier.is_some(),
            carrier,
        })
    }

    /// One plan per active subscription, in platform order.
    pub fn cellular_plans(&self) -> Result<Vec<CellularPlan>, EsimError> {
        self.require_permission()?;

        let level = self.platform.telephony.api_level();
        if !self
            .capabilities
            .is_available(Capability::SubscriptionList, level)
        {
            return Ok(Vec::new());
        }

        let report_embedded = self
            .capabilities
            .is_available(Capability::EmbeddedFlag, level);
        let plans = self
            .platform
            .telephony
            .active_subscriptions()?
            .iter()
            .map(|record| CellularPlan::from_record(record, report_embedded))
            .collect();
        Ok(plans)
    }

    /// Launch the OS eSIM installation flow for `request`.
    ///
    /// Success means one of the configured screens was launched. Whether the
    /// user completes the installation is not observable.
    pub fn install_esim_profile(
        &self,
        request: &InstallRequest,
    ) -> Result<InstallOutcome, EsimError> {
        let level = self.platform.telephony.api_level();
        self.capabilities
            .require(Capability::EuiccManagement, level)?;

        if !self.platform.telephony.euicc_state()?.is_enabled() {
            return Err(EsimError::NotSupported);
        }

        let code = ActivationCode::parse(request.activation_code.as_deref())?;
        if request.confirmation_code.is_some() {
            debug!("confirmation code supplied; the platform intent has no slot for it");
        }

        if !self.platform.activity.has_foreground_activity() {
            return Err(EsimError::NoActivity);
        }

        if self.settings.copy_to_clipboard {
            self.platform
                .clipboard
                .set_plain_text(&self.settings.clipboard_label, code.as_str())?;
        }

        let activity = &self.platform.activity;
        match self
            .launch_chain
            .run(|strategy| activity.start_activity(&strategy.intent(&code)))
        {
            Ok(success) => {
                info!(
                    strategy = %success.strategy,
                    attempts = success.attempts(),
                    "eSIM installation screen launched"
                );
                Ok(InstallOutcome {
                    launched: *success.strategy,
                    attempts: success.attempts(),
                })
            }
            Err(exhausted) => {
                warn!(
                    attempts = exhausted.attempts,
                    "no eSIM installation screen could be launched"
                );
                let detail = exhausted.last_error.map_or_else(
                    || "no launch strategy configured".to_string(),
                    |e| e.to_string(),
                );
                Err(EsimError::SettingsFailed { detail })
            }
        }
    }

    fn require_permission(&self) -> Result<(), EsimError> {
        if self.check_permission() {
            Ok(())
        } else {
            Err(EsimError::PermissionDenied)
        }
    }

    /// First subscription flagged embedded, if the platform can say so.
    fn first_embedded_subscription(&self) -> Result<Option<SubscriptionRecord>, EsimError> {
        let level = self.platform.telephony.api_level();
        if !self
            .capabilities
            .is_available(Capability::SubscriptionList, level)
            || !self
                .capabilities
                .is_available(Capability::EmbeddedFlag, level)
        {
            return Ok(None);
        }

        Ok(self
            .platform
            .telephony
            .active_subscriptions()?
            .into_iter()
            .find(SubscriptionRecord::is_embedded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiLevel, EuiccState};
    use crate::launch::{
        ACTION_EUICC_SETTINGS, ACTION_PROVISION_EMBEDDED_SUBSCRIPTION, ACTION_SIM_SETTINGS,
        ACTION_WIRELESS_SETTINGS,
    };
    use crate::ports::{MockActivityPort, PlatformError};
    use crate::testing::{FakePlatform, subscription};
    use mockall::Sequence;
    use std::sync::Arc;

    const ALL_ACTIONS: [&str; 4] = [
        ACTION_PROVISION_EMBEDDED_SUBSCRIPTION,
        ACTION_EUICC_SETTINGS,
        ACTION_SIM_SETTINGS,
        ACTION_WIRELESS_SETTINGS,
    ];

    fn gateway(fake: FakePlatform) -> (Arc<FakePlatform>, EsimGateway) {
        let (fake, platform) = fake.into_platform();
        let gateway = EsimGateway::new(platform, GatewaySettings::default()).unwrap();
        (fake, gateway)
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let (_, platform) = FakePlatform::new().into_platform();
        let settings = GatewaySettings {
            launch_order: Vec::new(),
            ..Default::default()
        };
        let err = EsimGateway::new(platform, settings).err().unwrap();
        assert!(matches!(err, EsimError::Settings(_)));
    }

    #[test]
    fn test_supported_requires_service_and_feature() {
        let (_, gw) = gateway(FakePlatform::new());
        assert!(gw.is_esim_supported().unwrap());

        let (_, gw) = gateway(FakePlatform::new().with_euicc(EuiccState::Enabled, false));
        assert!(!gw.is_esim_supported().unwrap());

        let (_, gw) = gateway(FakePlatform::new().with_euicc(EuiccState::Disabled, true));
        assert!(!gw.is_esim_supported().unwrap());

        let (_, gw) = gateway(FakePlatform::new().with_euicc(EuiccState::Absent, true));
        assert!(!gw.is_esim_supported().unwrap());
    }

    #[test]
    fn test_supported_false_below_floor() {
        for level in [19, 22, 26, 27] {
            let (_, gw) = gateway(FakePlatform::new().with_api_level(level));
            assert!(!gw.is_esim_supported().unwrap(), "level {level}");
        }
    }

    #[test]
    fn test_enabled_requires_permission() {
        let (fake, gw) = gateway(
            FakePlatform::new()
                .with_permission(false)
                .with_subscription(subscription(1, "Carrier", Some(true))),
        );
        assert!(matches!(
            gw.is_esim_enabled(),
            Err(EsimError::PermissionDenied)
        ));
        assert_eq!(fake.record().subscription_queries, 0);
    }

    #[test]
    fn test_enabled_detects_embedded_subscription() {
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_subscription(subscription(1, "Physical", Some(false)))
                .with_subscription(subscription(2, "Embedded", Some(true))),
        );
        assert!(gw.is_esim_enabled().unwrap());

        let (_, gw) = gateway(
            FakePlatform::new().with_subscription(subscription(1, "Physical", Some(false))),
        );
        assert!(!gw.is_esim_enabled().unwrap());
    }

    #[test]
    fn test_enabled_false_below_embedded_floor() {
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_api_level(27)
                .with_subscription(subscription(1, "Embedded", Some(true))),
        );
        assert!(!gw.is_esim_enabled().unwrap());
    }

    #[test]
    fn test_esim_info_uses_first_embedded_match() {
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_subscription(subscription(1, "Physical", Some(false)))
                .with_subscription(subscription(2, "First eSIM", Some(true)))
                .with_subscription(subscription(3, "Second eSIM", Some(true))),
        );
        let info = gw.esim_info().unwrap();
        assert!(info.is_esim_supported);
        assert!(info.is_esim_enabled);
        let carrier = info.carrier.unwrap();
        assert_eq!(carrier.carrier_name, "First eSIM");
        assert_eq!(carrier.mobile_country_code, "310");
        assert_eq!(carrier.mobile_network_code, "262");
    }

    #[test]
    fn test_esim_info_without_permission_skips_scan() {
        let (fake, gw) = gateway(
            FakePlatform::new()
                .with_permission(false)
                .with_subscription(subscription(1, "Embedded", Some(true))),
        );
        let info = gw.esim_info().unwrap();
        assert!(info.is_esim_supported);
        assert!(!info.is_esim_enabled);
        assert!(info.carrier.is_none());
        assert_eq!(fake.record().subscription_queries, 0);
    }

    #[test]
    fn test_esim_info_propagates_platform_error() {
        let (_, gw) = gateway(FakePlatform::new().with_subscription_error(PlatformError::call(
            "getActiveSubscriptionInfoList",
            "SecurityException",
        )));
        let err = gw.esim_info().unwrap_err();
        assert_eq!(err.code(), "ERROR");
    }

    #[test]
    fn test_plans_preserve_order_and_count() {
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_subscription(subscription(7, "B", Some(false)))
                .with_subscription(subscription(3, "A", Some(true)))
                .with_subscription(subscription(7, "B", Some(false))),
        );
        let plans = gw.cellular_plans().unwrap();
        let ids: Vec<i32> = plans.iter().map(|p| p.subscription_id).collect();
        assert_eq!(ids, vec![7, 3, 7]);
        assert_eq!(plans[1].is_embedded, Some(true));
    }

    #[test]
    fn test_plans_omit_embedded_flag_below_floor() {
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_api_level(26)
                .with_subscription(subscription(1, "A", None)),
        );
        let plans = gw.cellular_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].is_embedded, None);
    }

    #[test]
    fn test_plans_empty_below_subscription_floor() {
        let (fake, gw) = gateway(
            FakePlatform::new()
                .with_api_level(21)
                .with_subscription(subscription(1, "A", None)),
        );
        assert!(gw.cellular_plans().unwrap().is_empty());
        assert_eq!(fake.record().subscription_queries, 0);
    }

    #[test]
    fn test_install_checks_in_contract_order() {
        // Below the floor wins over a disabled service and an empty code.
        let (_, gw) = gateway(
            FakePlatform::new()
                .with_api_level(27)
                .with_euicc(EuiccState::Disabled, false),
        );
        let err = gw.install_esim_profile(&InstallRequest::default()).unwrap_err();
        assert!(matches!(err, EsimError::VersionNotSupported { .. }));

        let (_, gw) = gateway(FakePlatform::new().with_euicc(EuiccState::Absent, false));
        let err = gw.install_esim_profile(&InstallRequest::default()).unwrap_err();
        assert!(matches!(err, EsimError::NotSupported));

        let (_, gw) = gateway(FakePlatform::new().with_foreground_activity(false));
        let err = gw.install_esim_profile(&InstallRequest::default()).unwrap_err();
        assert!(matches!(err, EsimError::InvalidActivationCode));

        let (fake, gw) = gateway(FakePlatform::new().with_foreground_activity(false));
        let err = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap_err();
        assert!(matches!(err, EsimError::NoActivity));
        assert!(fake.record().clipboard.is_empty());
    }

    #[test]
    fn test_install_copies_code_and_launches_first_strategy() {
        let (fake, gw) = gateway(FakePlatform::new());
        let outcome = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$smdp$match"))
            .unwrap();

        assert_eq!(
            outcome.launched,
            LaunchStrategy::ProvisionEmbeddedSubscription
        );
        assert_eq!(outcome.attempts, 1);
        let record = fake.record();
        assert_eq!(
            record.clipboard,
            vec![(
                "eSIM Activation Code".to_string(),
                "LPA:1$smdp$match".to_string()
            )]
        );
        assert_eq!(fake.launched_actions(), vec![ACTION_PROVISION_EMBEDDED_SUBSCRIPTION]);
    }

    #[test]
    fn test_install_clipboard_failure_aborts_before_launch() {
        let (fake, gw) = gateway(
            FakePlatform::new()
                .with_clipboard_error(PlatformError::Unavailable("clipboard".into())),
        );
        let err = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap_err();
        assert_eq!(err.code(), "ERROR");
        assert!(fake.launched_actions().is_empty());
    }

    #[test]
    fn test_install_skips_clipboard_when_disabled() {
        let (fake, platform) = FakePlatform::new().into_platform();
        let settings = GatewaySettings {
            copy_to_clipboard: false,
            ..Default::default()
        };
        let gw = EsimGateway::new(platform, settings).unwrap();
        gw.install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap();
        assert!(fake.record().clipboard.is_empty());
    }

    #[test]
    fn test_install_respects_configured_order() {
        let (fake, platform) = FakePlatform::new()
            .failing_action(ACTION_WIRELESS_SETTINGS, "no wireless settings")
            .into_platform();
        let settings = GatewaySettings {
            launch_order: vec![
                LaunchStrategy::WirelessSettings,
                LaunchStrategy::EuiccSettings,
            ],
            ..Default::default()
        };
        let gw = EsimGateway::new(platform, settings).unwrap();
        let outcome = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap();
        assert_eq!(outcome.launched, LaunchStrategy::EuiccSettings);
        assert_eq!(
            fake.launched_actions(),
            vec![ACTION_WIRELESS_SETTINGS, ACTION_EUICC_SETTINGS]
        );
    }

    #[test]
    fn test_install_tries_strategies_in_strict_sequence() {
        let fake = Arc::new(FakePlatform::new());
        let mut activity = MockActivityPort::new();
        let mut seq = Sequence::new();

        activity
            .expect_has_foreground_activity()
            .return_const(true);
        for (i, action) in ALL_ACTIONS.into_iter().enumerate() {
            activity
                .expect_start_activity()
                .withf(move |intent| intent.action == action)
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| {
                    if i < 3 {
                        Err(PlatformError::Launch(format!("strategy {} refused", i + 1)))
                    } else {
                        Ok(())
                    }
                });
        }

        let platform = Platform::new(fake.clone(), fake, Arc::new(activity));
        let gw = EsimGateway::new(platform, GatewaySettings::default()).unwrap();
        let outcome = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap();

        assert_eq!(outcome.launched, LaunchStrategy::WirelessSettings);
        assert_eq!(outcome.attempts, 4);
    }

    #[test]
    fn test_install_exhaustion_reports_last_error() {
        let mut fake = FakePlatform::new();
        for (i, action) in ALL_ACTIONS.iter().enumerate() {
            fake = fake.failing_action(action, &format!("strategy {} refused", i + 1));
        }
        let (fake, gw) = gateway(fake);

        let err = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap_err();
        match err {
            EsimError::SettingsFailed { detail } => assert_eq!(detail, "strategy 4 refused"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fake.launched_actions(), ALL_ACTIONS.to_vec());
    }

    #[test]
    fn test_custom_capability_table() {
        let (_, platform) = FakePlatform::new().with_api_level(29).into_platform();
        let gw = EsimGateway::new(platform, GatewaySettings::default())
            .unwrap()
            .with_capabilities(
                CapabilityTable::default().with_floor(Capability::EuiccManagement, ApiLevel(30)),
            );
        let err = gw
            .install_esim_profile(&InstallRequest::new("LPA:1$x$y"))
            .unwrap_err();
        assert!(matches!(
            err,
            EsimError::VersionNotSupported { required, .. } if required == ApiLevel(30)
        ));
    }
}
