use crate::cli::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &mut AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx).await,
        Commands::Catalog(args) => commands::catalog::handle(&args, ctx).await,
        Commands::Latest => commands::latest::handle(ctx).await,
        Commands::Manga { action } => commands::manga::handle(&action, ctx).await,
        Commands::Read(args) => commands::read::handle(&args, ctx).await,
        Commands::Admin { action } => commands::admin::handle(action, ctx).await,
    }
}
