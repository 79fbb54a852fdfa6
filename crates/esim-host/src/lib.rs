#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod bridge;
pub mod call;
pub mod error;

// Re-export primary types
pub use bridge::{HostBridge, HostResponse};
pub use call::HostCall;
pub use error::HostError;
