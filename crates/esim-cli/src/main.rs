//! CLI entry point - the composition root.

use anyhow::Context;
use clap::Parser;

use esim_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Logs go to stderr so stdout stays machine readable.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::ProfileTemplate) {
        handlers::profile_template::execute()?;
        return Ok(());
    }

    let config = CliConfig {
        profile: cli.profile,
        settings: cli.settings,
        json: cli.json,
    };
    let ctx = bootstrap(&config).context("failed to set up simulated device")?;

    match cli.command {
        Commands::Permission => handlers::query::permission(&ctx)?,
        Commands::Supported => handlers::query::supported(&ctx)?,
        Commands::Enabled => handlers::query::enabled(&ctx)?,
        Commands::Info => handlers::query::info(&ctx)?,
        Commands::Plans => handlers::query::plans(&ctx)?,
        Commands::Install {
            activation_code,
            confirmation_code,
        } => handlers::install::execute(&ctx, activation_code, confirmation_code)?,
        Commands::Call { request } => handlers::call::execute(&ctx, &request)?,
        Commands::ProfileTemplate => handlers::profile_template::execute()?,
    }
    Ok(())
}

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
