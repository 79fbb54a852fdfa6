//! Host-facing error type and mappings.
//!
//! The host runtime receives failures as `{"code": ..., "message": ...}`;
//! the codes are the ones the JavaScript side already switches on.

use esim_core::EsimError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code for requests that could not be decoded or name no known method.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Serializable failure sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct HostError {
    pub code: String,
    pub message: String,
}

impl HostError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }
}

impl From<EsimError> for HostError {
    fn from(err: EsimError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_request(err.to_string())
    }
}
