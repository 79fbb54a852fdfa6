#![doc = include_str!("../README.md")]

#[cfg(target_os = "android")]
mod exports;
#[cfg(target_os = "android")]
mod jni_util;
#[cfg(target_os = "android")]
pub mod platform;
#[cfg(target_os = "android")]
mod runtime;

#[cfg(target_os = "android")]
pub use platform::AndroidPlatform;

/// Logcat tag used for all log output of this library.
pub const LOG_TAG: &str = "EsimManager";

// Used only by the Android build
#[cfg(not(target_os = "android"))]
use esim_core as _;
#[cfg(not(target_os = "android"))]
use esim_host as _;
#[cfg(not(target_os = "android"))]
use serde_json as _;
#[cfg(not(target_os = "android"))]
use tracing as _;
