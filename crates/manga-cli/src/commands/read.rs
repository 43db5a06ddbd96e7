use serde::Serialize;

use manga_core::Page;
use manga_views::{Reader, ReaderPages};

use crate::cli::root_commands::ReadArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ReadResponse {
    title: String,
    chapter: u32,
    indicator: String,
    prev_enabled: bool,
    next_enabled: bool,
    back: String,
    location: String,
    pages: ReaderPages,
}

pub async fn handle(args: &ReadArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let api = ctx
        .open_page(Page::Reader {
            manga_id: args.manga,
            chapter: args.chapter,
        })
        .await?;
    let reader = Reader::open(&api, &ctx.config, args.manga, args.chapter)
        .await
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;

    output(
        &ReadResponse {
            title: reader.document_title(),
            chapter: reader.current_chapter(),
            indicator: reader.page_indicator(),
            prev_enabled: reader.prev_enabled(),
            next_enabled: reader.next_enabled(),
            back: reader.back_link().path(),
            location: reader.location().path(),
            pages: reader.pages().clone(),
        },
        ctx.flags.format,
    )
}
