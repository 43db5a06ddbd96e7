//! Manga cards as shown in grids and lists.

use serde::Serialize;

use manga_core::{Manga, Page, assets};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MangaCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub status_class: &'static str,
    pub is_latest: bool,
    pub chapter_count: usize,
    pub cover_url: String,
    pub detail: Page,
}

impl MangaCard {
    pub fn new(manga: &Manga, server_url: &str) -> Self {
        Self {
            id: manga.id,
            title: manga.title.clone(),
            description: manga.description.clone(),
            status: manga.status.clone(),
            status_class: manga.status_kind().css_class(),
            is_latest: manga.is_latest,
            chapter_count: manga.chapter_count(),
            cover_url: assets::cover_src(server_url, manga.cover.as_deref()),
            detail: Page::MangaDetail { id: manga.id },
        }
    }

    pub fn from_all(mangas: &[Manga], server_url: &str) -> Vec<Self> {
        mangas.iter().map(|manga| Self::new(manga, server_url)).collect()
    }
}
