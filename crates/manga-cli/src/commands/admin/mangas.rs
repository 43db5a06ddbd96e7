use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use manga_api::UploadFile;
use manga_auth::DynStore;
use manga_views::admin::{MangaStats, UploadDraft};
use manga_views::{AdminPanel, MangaCard, MangaFilter, MangaForm};

use crate::cli::subcommands::AdminMangaCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MangaListResponse {
    filter: MangaFilter,
    stats: MangaStats,
    cards: Vec<MangaCard>,
}

#[derive(Serialize)]
struct MangaChangeResponse {
    ok: bool,
    stats: MangaStats,
}

pub async fn handle(
    action: AdminMangaCommands,
    panel: &mut AdminPanel<DynStore>,
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    match action {
        AdminMangaCommands::List { search, filter } => {
            ctx.ensure_no_error()?;
            panel.set_search(search.unwrap_or_default());
            panel.set_filter(filter);
            return output(
                &MangaListResponse {
                    filter,
                    stats: panel.stats(),
                    cards: panel.cards(),
                },
                ctx.flags.format,
            );
        }
        AdminMangaCommands::Create(args) => {
            panel.open_create();
            let form = panel.form_mut().context("manga form did not open")?;
            form.title = args.title;
            form.description = args.description;
            let fields = args.manga;
            fill(
                form,
                fields.status,
                fields.latest,
                fields.cover.as_deref(),
                &fields.chapters,
                ctx,
            )?;
            submit(panel, ctx).await?;
        }
        AdminMangaCommands::Update(args) => {
            if !panel.open_edit(args.id) {
                anyhow::bail!("manga {} not found", args.id);
            }
            let form = panel.form_mut().context("manga form did not open")?;
            if let Some(title) = args.title {
                form.title = title;
            }
            if let Some(description) = args.description {
                form.description = description;
            }
            let status = args.status.unwrap_or_else(|| form.status.clone());
            let latest = args.latest.unwrap_or(form.is_latest);
            fill(form, status, latest, args.cover.as_deref(), &args.chapters, ctx)?;
            submit(panel, ctx).await?;
        }
        AdminMangaCommands::Delete { id } => {
            if !panel.confirm_delete(id) {
                anyhow::bail!("manga {id} not found");
            }
            let redirect = panel.delete_confirmed(&mut ctx.notes).await;
            ctx.report_redirect(redirect);
            ctx.ensure_no_error()?;
        }
    }

    output(
        &MangaChangeResponse {
            ok: true,
            stats: panel.stats(),
        },
        ctx.flags.format,
    )
}

/// Fields shared by create and update.
fn fill(
    form: &mut MangaForm,
    status: String,
    latest: bool,
    cover: Option<&Path>,
    chapters: &[String],
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    form.status = status;
    form.is_latest = latest;
    if let Some(path) = cover {
        let file = UploadFile::from_path(path)?;
        form.select_cover(file)
            .with_context(|| format!("cover {}", path.display()))?;
    }
    form.draft = draft_from(chapters, ctx)?;
    Ok(())
}

/// One chapter per `--chapter` value, pages comma separated.
fn draft_from(chapters: &[String], ctx: &mut AppContext) -> anyhow::Result<UploadDraft> {
    let mut draft = UploadDraft::new();
    for pages in chapters {
        let number = draft.add_chapter();
        let files = pages
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(|path| UploadFile::from_path(Path::new(path)))
            .collect::<Result<Vec<_>, _>>()?;
        let picked = files.len();
        let kept = draft.set_chapter_files(number, files).unwrap_or_default();
        if kept < picked {
            ctx.notes.info(format!(
                "Capítulo {number}: {} arquivo(s) ignorado(s), apenas imagens são aceitas",
                picked - kept
            ));
        }
    }
    Ok(draft)
}

async fn submit(panel: &mut AdminPanel<DynStore>, ctx: &mut AppContext) -> anyhow::Result<()> {
    let redirect = panel.submit(&mut ctx.notes).await;
    ctx.report_redirect(redirect);
    ctx.ensure_no_error()
}
