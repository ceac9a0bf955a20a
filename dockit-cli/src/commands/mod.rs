//! Command handler modules for the CLI.

mod show;
mod stats;
mod validate;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Show { file } => show::cmd_show(&file),
        Commands::Validate { file, kinds } => validate::cmd_validate(&file, kinds.as_deref()),
        Commands::Stats { file } => stats::cmd_stats(&file),
    }
}
