//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Query and exercise the eSIM gateway against a simulated device.
#[derive(Parser)]
#[command(name = "esimctl")]
#[command(about = "Query eSIM capabilities and launch installs on a simulated device")]
#[command(version)]
pub struct Cli {
    /// Device profile (JSON) to simulate; defaults to a built-in device
    #[arg(long, env = "ESIM_PROFILE", global = true)]
    pub profile: Option<PathBuf>,

    /// Gateway settings (JSON): clipboard label, launch order
    #[arg(long, env = "ESIM_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Print raw JSON values instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["esimctl", "info", "--verbose", "--profile", "/tmp/pixel.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.profile, Some(PathBuf::from("/tmp/pixel.json")));
        assert!(matches!(cli.command, Commands::Info));
    }

    #[test]
    fn test_install_arguments() {
        let cli = Cli::parse_from([
            "esimctl",
            "install",
            "LPA:1$smdp$id",
            "--confirmation-code",
            "1234",
        ]);
        match cli.command {
            Commands::Install {
                activation_code,
                confirmation_code,
            } => {
                assert_eq!(activation_code, "LPA:1$smdp$id");
                assert_eq!(confirmation_code.as_deref(), Some("1234"));
            }
            _ => panic!("expected install"),
        }
    }
}
