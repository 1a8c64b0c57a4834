use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Apply(args) => commands::apply::handle(&args, ctx, flags).await,
        Commands::Plan(args) => commands::plan::handle(&args, ctx, flags).await,
        Commands::Read(args) => commands::read::handle(&args, ctx, flags).await,
        Commands::Delete(args) => commands::delete::handle(&args, ctx, flags).await,
    }
}
