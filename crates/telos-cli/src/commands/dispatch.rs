use telos_config::TelosConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &TelosConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, config, flags),
        Commands::Classify(args) => commands::classify::handle(&args, config, flags),
        Commands::Extract(args) => commands::extract::handle(&args, config, flags),
        Commands::Catalog | Commands::Schema(_) => {
            unreachable!("catalog/schema are pre-dispatched in main")
        }
    }
}
