use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Url { action } => commands::url::handle(&action, flags),
        Commands::Search(args) => commands::search::handle(&args, flags).await,
        Commands::Suggest(args) => commands::suggest::handle(&args, flags).await,
        Commands::Detect(args) => commands::detect::handle(&args, flags),
    }
}
