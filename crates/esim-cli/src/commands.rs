//! Available subcommands.
//!
//! The read commands mirror the host methods one to one.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether READ_PHONE_STATE is granted
    Permission,

    /// Check whether the device supports eSIM
    Supported,

    /// Check whether an eSIM subscription is active
    Enabled,

    /// Show eSIM support and the active eSIM carrier
    Info,

    /// List active subscriptions
    Plans,

    /// Copy an activation code and open the OS eSIM installation screen
    Install {
        /// LPA activation code (e.g. "LPA:1$smdp.example.com$MATCHING-ID")
        activation_code: String,
        /// Confirmation code from the carrier, if any
        #[arg(long)]
        confirmation_code: Option<String>,
    },

    /// Send a raw host request, e.g. '{"method":"getEsimInfo"}'
    Call {
        /// Request JSON
        request: String,
    },

    /// Print an example device profile
    ProfileTemplate,
}
