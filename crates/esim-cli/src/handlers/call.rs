//! Raw host request passthrough.

use esim_host::HostResponse;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the host response envelope for `request` exactly as a host would
/// receive it. A failed call is also returned as an error for the exit code.
pub fn execute(ctx: &CliContext, request: &str) -> Result<(), CliError> {
    let response = ctx.bridge().handle_request(request);
    println!("{}", response.to_json());
    into_result(response)
}

fn into_result(response: HostResponse) -> Result<(), CliError> {
    match response.error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
