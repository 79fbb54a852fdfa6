//! Read-only queries: permission, support, enablement, info and plans.

use serde::Serialize;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_flag, format_info, format_plans, print_json};

fn emit<T: Serialize>(ctx: &CliContext, value: &T, text: String) -> Result<(), CliError> {
    if ctx.json() {
        print_json(value)
    } else {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

pub fn permission(ctx: &CliContext) -> Result<(), CliError> {
    let granted = ctx.gateway().check_permission();
    emit(ctx, &granted, format_flag("READ_PHONE_STATE granted", granted))
}

pub fn supported(ctx: &CliContext) -> Result<(), CliError> {
    let supported = ctx.gateway().is_esim_supported()?;
    emit(ctx, &supported, format_flag("eSIM supported", supported))
}

pub fn enabled(ctx: &CliContext) -> Result<(), CliError> {
    let enabled = ctx.gateway().is_esim_enabled()?;
    emit(ctx, &enabled, format_flag("eSIM enabled", enabled))
}

pub fn info(ctx: &CliContext) -> Result<(), CliError> {
    let info = ctx.gateway().esim_info()?;
    emit(ctx, &info, format_info(&info))
}

pub fn plans(ctx: &CliContext) -> Result<(), CliError> {
    let plans = ctx.gateway().cellular_plans()?;
    emit(ctx, &plans, format_plans(&plans))
}
