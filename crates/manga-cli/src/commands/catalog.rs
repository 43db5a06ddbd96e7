use serde::Serialize;

use manga_core::Page;
use manga_views::catalog::{CatalogQuery, Pagination};
use manga_views::{Catalog, MangaCard};

use crate::cli::root_commands::CatalogArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CatalogResponse {
    label: String,
    page: usize,
    total_pages: usize,
    pagination: Option<Pagination>,
    cards: Vec<MangaCard>,
}

pub async fn handle(args: &CatalogArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let api = ctx.open_page(Page::Catalog).await?;
    let mut catalog = Catalog::load(&api, ctx.config.catalog.page_size, &mut ctx.notes).await;
    ctx.ensure_no_error()?;

    if args.latest_only {
        catalog.show_latest_only(&mut ctx.notes);
    } else {
        catalog.apply(CatalogQuery {
            search: args.search.clone().unwrap_or_default(),
            status: args.status.clone(),
            sort: args.sort,
        });
    }
    if !catalog.go_to_page(args.page) && args.page != 1 {
        anyhow::bail!(
            "page {} out of range (1-{})",
            args.page,
            catalog.total_pages().max(1)
        );
    }

    let server_url = &ctx.config.api.server_url;
    output(
        &CatalogResponse {
            label: catalog.results_label(),
            page: catalog.page(),
            total_pages: catalog.total_pages(),
            pagination: catalog.pagination(),
            cards: MangaCard::from_all(catalog.current_items(), server_url),
        },
        ctx.flags.format,
    )
}
