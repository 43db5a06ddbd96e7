use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum MangaCommands {
    /// Details, chapters, and similar titles.
    Show {
        /// Manga id.
        id: i64,
    },
    /// Add to your favorites (requires login).
    Favorite {
        /// Manga id.
        id: i64,
    },
}
