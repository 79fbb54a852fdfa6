//! Port definitions (trait abstractions) for the operating system.
//!
//! Ports define what the gateway expects from the platform. They contain no
//! JNI or Android types and use only domain types.
//!
//! # Design Rules
//!
//! - Ports report raw facts; version policy stays in `CapabilityTable`
//! - No caching: every call reads live platform state
//! - Methods are synchronous; every platform query is a local OS call

pub mod activity;
pub mod clipboard;
pub mod telephony;

use std::sync::Arc;
use thiserror::Error;

pub use activity::ActivityPort;
pub use clipboard::ClipboardPort;
pub use telephony::TelephonyPort;

#[cfg(test)]
pub use activity::MockActivityPort;

/// Errors raised by platform adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// A system service or runtime handle is not available.
    #[error("Platform unavailable: {0}")]
    Unavailable(String),

    /// A platform call failed (Java exception, null result, ...).
    #[error("{operation} failed: {message}")]
    Call { operation: String, message: String },

    /// Starting an activity was refused.
    #[error("{0}")]
    Launch(String),
}

impl PlatformError {
    pub fn call(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Call {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Container for all platform ports.
///
/// Lets adapters hand the gateway one value without coupling it to concrete
/// implementations. A single adapter type usually implements all three.
#[derive(Clone)]
pub struct Platform {
    pub telephony: Arc<dyn TelephonyPort>,
    pub clipboard: Arc<dyn ClipboardPort>,
    pub activity: Arc<dyn ActivityPort>,
}

impl Platform {
    pub fn new(
        telephony: Arc<dyn TelephonyPort>,
        clipboard: Arc<dyn ClipboardPort>,
        activity: Arc<dyn ActivityPort>,
    ) -> Self {
        Self {
            telephony,
            clipboard,
            activity,
        }
    }

    /// Build a container from one adapter implementing every port.
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: TelephonyPort + ClipboardPort + ActivityPort + 'static,
    {
        Self {
            telephony: adapter.clone(),
            clipboard: adapter.clone(),
            activity: adapter,
        }
    }
}
