use serde::Serialize;

use manga_auth::DynStore;
use manga_views::AdminPanel;
use manga_views::admin::{UserCard, UserStats};

use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct UserListResponse {
    stats: UserStats,
    users: Vec<UserCard>,
}

pub async fn handle(
    action: &UserCommands,
    panel: &mut AdminPanel<DynStore>,
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    let redirect = panel.load_users(&mut ctx.notes).await;
    ctx.report_redirect(redirect);
    ctx.ensure_no_error()?;

    let redirect = match action {
        UserCommands::List => None,
        UserCommands::Role { id, role } => {
            if !panel.edit_user(*id, &mut ctx.notes) {
                ctx.ensure_no_error()?;
                anyhow::bail!("user {id} not found");
            }
            panel.select_role(role.clone());
            panel.submit_role(&mut ctx.notes).await
        }
        UserCommands::Delete { id } => {
            if !panel.confirm_delete_user(*id, &mut ctx.notes) {
                ctx.ensure_no_error()?;
                anyhow::bail!("user {id} not found");
            }
            panel.delete_user_confirmed(&mut ctx.notes).await
        }
    };
    ctx.report_redirect(redirect);
    ctx.ensure_no_error()?;

    output(
        &UserListResponse {
            stats: panel.user_stats(),
            users: panel.user_cards(),
        },
        ctx.flags.format,
    )
}
