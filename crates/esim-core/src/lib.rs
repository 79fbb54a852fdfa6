#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod capability;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod launch;
pub mod ports;
pub mod services;
pub mod settings;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use capability::{Capability, CapabilityTable};
pub use domain::{
    ActivationCode, ApiLevel, CarrierIdentity, CellularPlan, EsimInfo, EuiccState,
    FLAG_ACTIVITY_NEW_TASK, InstallOutcome, InstallRequest, IntentExtra, IntentSpec,
    SubscriptionRecord,
};
pub use error::EsimError;
pub use fallback::{ChainExhausted, ChainSuccess, FallbackChain};
pub use launch::LaunchStrategy;
pub use ports::{ActivityPort, ClipboardPort, Platform, PlatformError, TelephonyPort};
pub use services::EsimGateway;
pub use settings::{DEFAULT_CLIPBOARD_LABEL, GatewaySettings, SettingsError, validate_settings};

// Silence unused dev-dependency warnings; used by individual test modules
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use serde_json as _;
