use std::path::PathBuf;

use clap::{Args, Subcommand};

use manga_core::Role;
use manga_views::MangaFilter;

/// Admin panel commands. All of them require an admin session.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Manga management.
    Mangas {
        #[command(subcommand)]
        action: AdminMangaCommands,
    },
    /// User management.
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum AdminMangaCommands {
    /// List mangas with stats.
    List {
        #[arg(long)]
        search: Option<String>,
        /// all, latest, ongoing, completed
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        filter: MangaFilter,
    },
    /// Upload a new manga.
    Create(CreateMangaArgs),
    /// Edit a manga; omitted fields keep their value.
    Update(UpdateMangaArgs),
    /// Delete a manga.
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct MangaFields {
    /// Cover image.
    #[arg(long)]
    pub cover: Option<PathBuf>,
    /// Page images of one chapter, comma separated. Repeat per chapter;
    /// chapters are numbered in order from 1.
    #[arg(long = "chapter")]
    pub chapters: Vec<String>,
    /// Flag as a latest release.
    #[arg(long)]
    pub latest: bool,
    #[arg(long, default_value = "Em andamento")]
    pub status: String,
}

#[derive(Clone, Debug, Args)]
pub struct CreateMangaArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[command(flatten)]
    pub manga: MangaFields,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateMangaArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Set or clear the latest-release flag.
    #[arg(long)]
    pub latest: Option<bool>,
    #[arg(long)]
    pub cover: Option<PathBuf>,
    /// New chapter pages, as for `create`.
    #[arg(long = "chapter")]
    pub chapters: Vec<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List users with stats.
    List,
    /// Change a user's role.
    Role {
        id: i64,
        #[arg(value_parser = parse_role)]
        role: Role,
    },
    /// Delete a user.
    Delete {
        id: i64,
    },
}

fn parse_filter(value: &str) -> Result<MangaFilter, String> {
    value.parse().map_err(|error: manga_core::CoreError| error.to_string())
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|error: manga_core::CoreError| error.to_string())
}
