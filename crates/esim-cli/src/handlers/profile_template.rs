//! Print an example device profile.

use crate::error::CliError;
use crate::presentation::print_json;
use crate::profile::DeviceProfile;

pub fn execute() -> Result<(), CliError> {
    print_json(&DeviceProfile::template())
}
