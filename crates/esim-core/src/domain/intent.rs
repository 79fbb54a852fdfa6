//! Platform-neutral description of an Android `Intent` to launch.

use serde::{Deserialize, Serialize};

/// `Intent.FLAG_ACTIVITY_NEW_TASK`.
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// Value attached to an intent extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IntentExtra {
    /// Plain string extra (`putExtra(String, String)`).
    Text(String),
    /// `DownloadableSubscription.forActivationCode(code)` as a parcelable extra.
    DownloadableSubscription { activation_code: String },
}

/// An intent the activity port is asked to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSpec {
    pub action: String,
    #[serde(default)]
    pub extras: Vec<(String, IntentExtra)>,
    #[serde(default)]
    pub flags: i32,
}

impl IntentSpec {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            extras: Vec::new(),
            flags: 0,
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: IntentExtra) -> Self {
        self.extras.push((key.into(), value));
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags |= flags;
        self
    }

    pub fn extra(&self, key: &str) -> Option<&IntentExtra> {
        self.extras.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}
