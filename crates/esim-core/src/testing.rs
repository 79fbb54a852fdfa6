//! In-memory platform for tests.
//!
//! `FakePlatform` implements every port from configured values and records
//! the side effects the gateway performs, so tests can assert on clipboard
//! writes and launch order without a device.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{ApiLevel, EuiccState, IntentSpec, SubscriptionRecord};
use crate::ports::{ActivityPort, ClipboardPort, Platform, PlatformError, TelephonyPort};

/// Side effects observed by a `FakePlatform`.
#[derive(Debug, Default, Clone)]
pub struct FakeRecord {
    /// `(label, text)` pairs written to the clipboard.
    pub clipboard: Vec<(String, String)>,
    /// Every intent passed to `start_activity`, including failed ones.
    pub launches: Vec<IntentSpec>,
    pub subscription_queries: usize,
}

/// Configurable fake of the Android platform.
#[derive(Debug)]
pub struct FakePlatform {
    pub api_level: ApiLevel,
    pub permission_granted: bool,
    pub euicc_state: EuiccState,
    pub euicc_feature: bool,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub subscription_error: Option<PlatformError>,
    pub foreground_activity: bool,
    pub clipboard_error: Option<PlatformError>,
    /// Actions whose launch fails, with the error message to raise.
    pub failing_actions: HashMap<String, String>,
    record: Mutex<FakeRecord>,
}

impl Default for FakePlatform {
    /// A current device with an enabled eUICC, permission granted, an
    /// activity in the foreground and no subscriptions.
    fn default() -> Self {
        Self {
            api_level: ApiLevel(34),
            permission_granted: true,
            euicc_state: EuiccState::Enabled,
            euicc_feature: true,
            subscriptions: Vec::new(),
            subscription_error: None,
            foreground_activity: true,
            clipboard_error: None,
            failing_actions: HashMap::new(),
            record: Mutex::new(FakeRecord::default()),
        }
    }
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_api_level(mut self, level: u32) -> Self {
        self.api_level = ApiLevel(level);
        self
    }

    #[must_use]
    pub fn with_permission(mut self, granted: bool) -> Self {
        self.permission_granted = granted;
        self
    }

    #[must_use]
    pub fn with_euicc(mut self, state: EuiccState, feature: bool) -> Self {
        self.euicc_state = state;
        self.euicc_feature = feature;
        self
    }

    #[must_use]
    pub fn with_subscription(mut self, record: SubscriptionRecord) -> Self {
        self.subscriptions.push(record);
        self
    }

    #[must_use]
    pub fn with_subscription_error(mut self, error: PlatformError) -> Self {
        self.subscription_error = Some(error);
        self
    }

    #[must_use]
    pub fn with_foreground_activity(mut self, present: bool) -> Self {
        self.foreground_activity = present;
        self
    }

    #[must_use]
    pub fn with_clipboard_error(mut self, error: PlatformError) -> Self {
        self.clipboard_error = Some(error);
        self
    }

    /// Make launches of `action` fail with `message`.
    #[must_use]
    pub fn failing_action(mut self, action: &str, message: &str) -> Self {
        self.failing_actions
            .insert(action.to_string(), message.to_string());
        self
    }

    /// Wrap into a `Platform` container, keeping a handle for assertions.
    pub fn into_platform(self) -> (Arc<Self>, Platform) {
        let fake = Arc::new(self);
        let platform = Platform::from_adapter(fake.clone());
        (fake, platform)
    }

    pub fn record(&self) -> FakeRecord {
        self.lock().clone()
    }

    /// Actions passed to `start_activity`, in call order.
    pub fn launched_actions(&self) -> Vec<String> {
        self.lock()
            .launches
            .iter()
            .map(|intent| intent.action.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, FakeRecord> {
        self.record
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Subscription record helper for tests.
pub fn subscription(id: i32, carrier: &str, embedded: Option<bool>) -> SubscriptionRecord {
    SubscriptionRecord {
        subscription_id: id,
        carrier_name: carrier.to_string(),
        mcc: "310".to_string(),
        mnc: format!("{}", 260 + id),
        embedded,
    }
}

impl TelephonyPort for FakePlatform {
    fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    fn has_phone_state_permission(&self) -> bool {
        self.permission_granted
    }

    fn euicc_state(&self) -> Result<EuiccState, PlatformError> {
        Ok(self.euicc_state)
    }

    fn has_euicc_feature(&self) -> Result<bool, PlatformError> {
        Ok(self.euicc_feature)
    }

    fn active_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, PlatformError> {
        self.lock().subscription_queries += 1;
        match &self.subscription_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.subscriptions.clone()),
        }
    }
}

impl ClipboardPort for FakePlatform {
    fn set_plain_text(&self, label: &str, text: &str) -> Result<(), PlatformError> {
        if let Some(err) = &self.clipboard_error {
            return Err(err.clone());
        }
        self.lock()
            .clipboard
            .push((label.to_string(), text.to_string()));
        Ok(())
    }
}

impl ActivityPort for FakePlatform {
    fn has_foreground_activity(&self) -> bool {
        self.foreground_activity
    }

    fn start_activity(&self, intent: &IntentSpec) -> Result<(), PlatformError> {
        self.lock().launches.push(intent.clone());
        match self.failing_actions.get(&intent.action) {
            Some(message) => Err(PlatformError::Launch(message.clone())),
            None => Ok(()),
        }
    }
}
