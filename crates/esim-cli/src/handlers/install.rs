//! Install command handler.

use esim_core::{InstallOutcome, InstallRequest};
use serde_json::{Value, json};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_install, format_launches, print_json};
use crate::profile::SimulationRecord;

/// Run the install flow and show what the simulated device saw.
///
/// The launch log is printed on failure as well, so exhausted fallbacks are
/// visible.
pub fn execute(
    ctx: &CliContext,
    activation_code: String,
    confirmation_code: Option<String>,
) -> Result<(), CliError> {
    let request = InstallRequest {
        activation_code: Some(activation_code),
        confirmation_code,
    };
    let result = ctx.gateway().install_esim_profile(&request);
    let record = ctx.device().record();

    if ctx.json() {
        print_json(&install_report(result.as_ref().ok(), &record))?;
    } else {
        print!("{}", format_launches(&record));
        if let Ok(outcome) = &result {
            println!("{}", format_install(outcome));
        }
    }

    result.map(|_| ()).map_err(CliError::from)
}

/// JSON form of an install run; `outcome` is null when nothing launched.
pub fn install_report(outcome: Option<&InstallOutcome>, record: &SimulationRecord) -> Value {
    json!({ "outcome": outcome, "device": record })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use esim_core::launch::{
        ACTION_EUICC_SETTINGS, ACTION_PROVISION_EMBEDDED_SUBSCRIPTION, ACTION_SIM_SETTINGS,
        ACTION_WIRELESS_SETTINGS,
    };
    use std::io::Write;

    fn refusing_device(json: bool) -> CliContext {
        let failing: serde_json::Map<String, Value> = [
            ACTION_PROVISION_EMBEDDED_SUBSCRIPTION,
            ACTION_EUICC_SETTINGS,
            ACTION_SIM_SETTINGS,
            ACTION_WIRELESS_SETTINGS,
        ]
        .iter()
        .map(|action| ((*action).to_string(), json!("refused")))
        .collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({ "failing_actions": failing })).unwrap();

        bootstrap(&CliConfig {
            profile: Some(file.path().to_path_buf()),
            json,
            ..CliConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_install_records_clipboard_and_first_launch() {
        let ctx = bootstrap(&CliConfig::default()).unwrap();
        execute(&ctx, "LPA:1$smdp$id".to_string(), None).unwrap();

        let record = ctx.device().record();
        assert_eq!(record.clipboard.len(), 1);
        assert_eq!(record.launches.len(), 1);
        assert!(record.launches[0].error.is_none());
    }

    #[test]
    fn test_empty_code_is_a_data_error() {
        let ctx = bootstrap(&CliConfig::default()).unwrap();
        let err = execute(&ctx, String::new(), None).unwrap_err();
        assert_eq!(err.exit_code(), 65);
        assert!(ctx.device().record().launches.is_empty());
    }

    #[test]
    fn test_json_report_keeps_launch_log_when_every_screen_is_refused() {
        let ctx = refusing_device(true);
        let err = execute(&ctx, "LPA:1$a$b".to_string(), None).unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let report = install_report(None, &ctx.device().record());
        assert!(report["outcome"].is_null());
        let launches = report["device"]["launches"].as_array().unwrap();
        assert_eq!(launches.len(), 4);
        assert!(launches.iter().all(|l| l["error"] == "refused"));
        assert_eq!(report["device"]["clipboard"][0][1], "LPA:1$a$b");
    }

    #[test]
    fn test_json_report_includes_outcome_on_success() {
        let ctx = bootstrap(&CliConfig::default()).unwrap();
        let outcome = ctx
            .gateway()
            .install_esim_profile(&InstallRequest::new("LPA:1$a$b"))
            .unwrap();
        let report = install_report(Some(&outcome), &ctx.device().record());
        assert_eq!(report["outcome"]["attempts"], 1);
        assert_eq!(report["device"]["launches"].as_array().unwrap().len(), 1);
    }
}
