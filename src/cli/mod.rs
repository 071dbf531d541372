//! CLI module for Mochi.
//!
//! - Argument parsing
//! - Version and usage display
//! - One-shot commands against the Mochi backend
//!
//! # Usage
//!
//! The CLI dispatcher is called early in main() to handle subcommands before
//! initializing the TUI:
//!
//! ```ignore
//! use mochi::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command, &config) {
//!     if let Err(e) = result {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//!     std::process::exit(0);
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod commands;
pub mod output;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::{execute, CliEnv};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::Config;

/// Run a CLI command if applicable.
///
/// # Returns
///
/// * `None` - If the command is `RunTui` (no CLI action needed)
/// * `Some(Ok(()))` - If a CLI command executed successfully
/// * `Some(Err(e))` - If a CLI command failed
pub fn run_cli_command(command: CliCommand, config: &Config) -> Option<Result<()>> {
    match command {
        CliCommand::RunTui => None,
        CliCommand::Version => {
            handle_version_command();
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(reason) => Some(Err(eyre!("{}\n\n{}", reason, USAGE))),
        other => Some(run_api_command(other, config)),
    }
}

fn run_api_command(command: CliCommand, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let env = CliEnv::from_config(config)?;
    let mut stdout = std::io::stdout();
    runtime.block_on(execute(command, &env, &mut stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_returns_none() {
        let result = run_cli_command(CliCommand::RunTui, &Config::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_returns_error_with_usage() {
        let result = run_cli_command(CliCommand::Invalid("unknown command 'x'".into()), &Config::default());
        let err = result.unwrap().unwrap_err().to_string();
        assert!(err.contains("unknown command 'x'"));
        assert!(err.contains("usage: mochi"));
    }
}
