//! Command handlers.
//!
//! Handlers are thin: call the gateway, then format for the terminal (or
//! print JSON when `--json` is set).

pub mod call;
pub mod install;
pub mod profile_template;
pub mod query;
