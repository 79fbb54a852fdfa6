//! Terminal formatting for gateway results.

use std::fmt::Write;

use esim_core::{CellularPlan, EsimInfo, InstallOutcome};
use serde::Serialize;

use crate::error::CliError;
use crate::profile::SimulationRecord;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Io(e.to_string()))?;
    println!("{text}");
    Ok(())
}

/// Truncates a string to a maximum length, adding "..." if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn format_flag(label: &str, value: bool) -> String {
    format!("{label}: {}", yes_no(value))
}

pub fn format_info(info: &EsimInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "eSIM supported: {}", yes_no(info.is_esim_supported));
    let _ = writeln!(out, "eSIM enabled:   {}", yes_no(info.is_esim_enabled));
    if let Some(carrier) = &info.carrier {
        let _ = writeln!(out, "Carrier:        {}", carrier.carrier_name);
        let _ = writeln!(
            out,
            "MCC/MNC:        {}/{}",
            carrier.mobile_country_code, carrier.mobile_network_code
        );
    }
    out
}

pub fn format_plans(plans: &[CellularPlan]) -> String {
    if plans.is_empty() {
        return "No active subscriptions.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<24} {:<5} {:<5} Embedded",
        "ID", "Carrier", "MCC", "MNC"
    );
    let _ = writeln!(out, "{}", "-".repeat(50));
    for plan in plans {
        let embedded = plan.is_embedded.map_or("--", yes_no);
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<5} {:<5} {}",
            plan.subscription_id,
            truncate_string(&plan.carrier_name, 23),
            plan.mobile_country_code,
            plan.mobile_network_code,
            embedded
        );
    }
    out
}

pub fn format_launches(record: &SimulationRecord) -> String {
    let mut out = String::new();
    for (label, text) in &record.clipboard {
        let _ = writeln!(out, "clipboard [{label}]: {text}");
    }
    for (index, attempt) in record.launches.iter().enumerate() {
        match &attempt.error {
            Some(error) => {
                let _ = writeln!(out, "  {}. {} -> refused: {error}", index + 1, attempt.action);
            }
            None => {
                let _ = writeln!(out, "  {}. {} -> launched", index + 1, attempt.action);
            }
        }
    }
    out
}

pub fn format_install(outcome: &InstallOutcome) -> String {
    format!(
        "Opened {} after {} attempt(s).",
        outcome.launched, outcome.attempts
    )
}
