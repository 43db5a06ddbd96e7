use manga_core::Page;
use manga_views::Home;

use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &mut AppContext) -> anyhow::Result<()> {
    let api = ctx.open_page(Page::Home).await?;
    let home = Home::load(&api, &ctx.config, &mut ctx.notes).await;
    ctx.ensure_no_error()?;
    output(&home.latest, ctx.flags.format)
}
