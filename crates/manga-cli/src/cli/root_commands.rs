use clap::{Args, Subcommand};

use manga_views::SortOrder;

use crate::cli::subcommands::{AdminCommands, AuthCommands, MangaCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Login, registration, and session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse the catalog with search, filters, sorting, and pages.
    Catalog(CatalogArgs),
    /// Latest releases, as on the home page.
    Latest,
    /// A single manga.
    Manga {
        #[command(subcommand)]
        action: MangaCommands,
    },
    /// Open a chapter in the reader.
    Read(ReadArgs),
    /// Admin panel: mangas and users.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArgs {
    /// Substring of the title or description.
    #[arg(long)]
    pub search: Option<String>,
    /// Exact status, e.g. "Finalizado".
    #[arg(long)]
    pub status: Option<String>,
    /// newest, oldest, title, chapters, status
    #[arg(long, default_value = "newest", value_parser = parse_sort)]
    pub sort: SortOrder,
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Only titles flagged as latest releases.
    #[arg(long, conflicts_with_all = ["search", "status"])]
    pub latest_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReadArgs {
    /// Manga id.
    pub manga: i64,
    /// Chapter number (defaults to the first).
    #[arg(long)]
    pub chapter: Option<u32>,
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    value.parse().map_err(|error: manga_core::CoreError| error.to_string())
}
