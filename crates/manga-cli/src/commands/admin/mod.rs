mod mangas;
mod users;

use anyhow::Context;

use manga_auth::DynStore;
use manga_core::Page;
use manga_views::AdminPanel;

use crate::cli::subcommands::AdminCommands;
use crate::context::AppContext;

/// Handle `mangactl admin <subcommand>`.
pub async fn handle(action: AdminCommands, ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut panel = open_panel(ctx).await?;
    match action {
        AdminCommands::Mangas { action } => mangas::handle(action, &mut panel, ctx).await,
        AdminCommands::Users { action } => users::handle(&action, &mut panel, ctx).await,
    }
}

async fn open_panel(ctx: &mut AppContext) -> anyhow::Result<AdminPanel<DynStore>> {
    let api = ctx.api(Page::Admin)?;
    match AdminPanel::bootstrap(api, &ctx.config, &mut ctx.notes).await {
        Ok(panel) => Ok(panel),
        Err(redirect) => {
            ctx.report_redirect(Some(redirect));
            Err(anyhow::anyhow!("admin session required"))
                .context("run `mangactl auth login` with an admin account")
        }
    }
}
