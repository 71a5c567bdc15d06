//! Command implementations for the stash CLI

mod restore;
mod save;

use crate::cli::Commands;

/// Execute a parsed subcommand
pub async fn execute(command: Commands) -> miette::Result<()> {
    match command {
        Commands::Restore {
            paths,
            key,
            restore_keys,
            lookup_only,
            json,
        } => restore::run(&paths, &key, &restore_keys, lookup_only, json).await,
        Commands::Save { paths, key, json } => save::run(&paths, &key, json).await,
    }
}
