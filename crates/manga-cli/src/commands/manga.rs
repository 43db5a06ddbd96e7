use serde::Serialize;

use manga_api::MangaApi;
use manga_auth::DynStore;
use manga_core::Page;
use manga_core::messages::MANGA_LOAD_FAILED;
use manga_views::MangaDetail;
use manga_views::MangaCard;
use manga_views::detail::ChapterEntry;

use crate::cli::subcommands::MangaCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DetailResponse {
    id: i64,
    title: String,
    description: String,
    status: String,
    status_class: &'static str,
    is_latest: bool,
    views: u64,
    cover_url: String,
    start_reading: String,
    chapters: Vec<ChapterEntry>,
    similar: Vec<MangaCard>,
}

#[derive(Serialize)]
struct FavoriteResponse {
    manga_id: i64,
    favorited: bool,
}

pub async fn handle(action: &MangaCommands, ctx: &mut AppContext) -> anyhow::Result<()> {
    match action {
        MangaCommands::Show { id } => show(*id, ctx).await,
        MangaCommands::Favorite { id } => favorite(*id, ctx).await,
    }
}

async fn load(
    id: i64,
    ctx: &AppContext,
) -> anyhow::Result<(MangaApi<DynStore>, MangaDetail)> {
    let api = ctx.open_page(Page::MangaDetail { id }).await?;
    let detail = MangaDetail::load(&api, &ctx.config, id)
        .await
        .map_err(|error| anyhow::anyhow!(error.user_message(MANGA_LOAD_FAILED)))?;
    Ok((api, detail))
}

async fn show(id: i64, ctx: &mut AppContext) -> anyhow::Result<()> {
    let (_, detail) = load(id, ctx).await?;
    let start_reading = detail.start_reading().path();
    let manga = detail.manga;
    output(
        &DetailResponse {
            id: manga.id,
            title: manga.title,
            description: manga.description,
            status: manga.status,
            status_class: detail.status_class,
            is_latest: manga.is_latest,
            views: manga.views,
            cover_url: detail.cover_url,
            start_reading,
            chapters: detail.chapters,
            similar: detail.similar,
        },
        ctx.flags.format,
    )
}

async fn favorite(id: i64, ctx: &mut AppContext) -> anyhow::Result<()> {
    let (mut api, detail) = load(id, ctx).await?;
    let favorited = detail.add_favorite(&mut api, &mut ctx.notes).await;
    ctx.ensure_no_error()?;
    output(
        &FavoriteResponse {
            manga_id: id,
            favorited,
        },
        ctx.flags.format,
    )
}
