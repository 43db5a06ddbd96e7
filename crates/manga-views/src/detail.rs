//! The manga detail screen.

use serde::Serialize;

use manga_api::{ApiError, MangaApi};
use manga_auth::KeyValueStore;
use manga_config::MangaConfig;
use manga_core::entities::sort_chapters;
use manga_core::messages::{FAVORITE_ADDED, FAVORITE_FAILED, LOGIN_REQUIRED_FOR_FAVORITES};
use manga_core::{Chapter, Manga, Page, assets, dates};

use crate::cards::MangaCard;
use crate::notify::Notifications;

/// One row of the chapter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    pub number: u32,
    /// `Capítulo {n}`
    pub label: String,
    pub date: String,
    pub views: u64,
    pub reader: Page,
}

impl ChapterEntry {
    fn new(manga_id: i64, chapter: &Chapter) -> Self {
        Self {
            number: chapter.number,
            label: chapter_label(chapter.number),
            date: dates::format_long_date(chapter.created_at.as_deref()),
            views: chapter.views,
            reader: Page::Reader {
                manga_id,
                chapter: Some(chapter.number),
            },
        }
    }
}

/// `Capítulo {n}`
pub fn chapter_label(number: u32) -> String {
    format!("Capítulo {number}")
}

#[derive(Debug, Clone)]
pub struct MangaDetail {
    pub manga: Manga,
    pub cover_url: String,
    pub status_class: &'static str,
    /// Ascending by number.
    pub chapters: Vec<ChapterEntry>,
    pub similar: Vec<MangaCard>,
}

impl MangaDetail {
    /// Load the manga, its chapters, and a few other titles.
    ///
    /// A chapter list failure falls back to the chapters embedded in the
    /// manga; a failure loading the other titles leaves `similar` empty.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown id, or whatever the manga
    /// request failed with. Show it with
    /// `error.user_message(messages::MANGA_LOAD_FAILED)`.
    pub async fn load<S: KeyValueStore>(
        api: &MangaApi<S>,
        config: &MangaConfig,
        id: i64,
    ) -> Result<Self, ApiError> {
        let manga = api.get_manga(id).await?;

        let mut chapters = match api.list_chapters(id).await {
            Ok(chapters) => chapters,
            Err(error) => {
                tracing::warn!(%error, manga = id, "chapter list failed, using embedded chapters");
                manga.chapters.clone()
            }
        };
        sort_chapters(&mut chapters);

        let similar = match api.list_mangas().await {
            Ok(all) => similar_to(&manga, &all, config.catalog.similar_limit),
            Err(error) => {
                tracing::warn!(%error, "similar titles failed to load");
                Vec::new()
            }
        };

        let server_url = &config.api.server_url;
        Ok(Self {
            cover_url: assets::cover_src(server_url, manga.cover.as_deref()),
            status_class: manga.status_kind().css_class(),
            chapters: chapters.iter().map(|c| ChapterEntry::new(id, c)).collect(),
            similar: MangaCard::from_all(&similar, server_url),
            manga,
        })
    }

    /// Where "start reading" goes: the first chapter, or the reader's own
    /// default when there are none.
    pub fn start_reading(&self) -> Page {
        Page::Reader {
            manga_id: self.manga.id,
            chapter: self.chapters.first().map(|c| c.number),
        }
    }

    /// Add this manga to the user's favorites. Always raises a toast.
    pub async fn add_favorite<S: KeyValueStore>(
        &self,
        api: &mut MangaApi<S>,
        notes: &mut Notifications,
    ) -> bool {
        if !api.auth().is_logged_in() {
            notes.error(LOGIN_REQUIRED_FOR_FAVORITES);
            return false;
        }
        match api.add_favorite(self.manga.id).await {
            Ok(()) => {
                notes.success(FAVORITE_ADDED);
                true
            }
            Err(error) => {
                tracing::warn!(%error, manga = self.manga.id, "favorite failed");
                notes.error(error.user_message(FAVORITE_FAILED));
                false
            }
        }
    }
}

/// Every other manga, in server order, up to `limit`.
pub fn similar_to(manga: &Manga, all: &[Manga], limit: usize) -> Vec<Manga> {
    all.iter()
        .filter(|other| other.id != manga.id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manga(id: i64) -> Manga {
        serde_json::from_value(serde_json::json!({"id": id, "title": format!("M{id}")})).unwrap()
    }

    #[test]
    fn similar_excludes_current_and_caps() {
        let all: Vec<Manga> = (1..=7).map(manga).collect();
        let ids: Vec<i64> = similar_to(&manga(2), &all, 4).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[test]
    fn chapter_entry_links_to_reader() {
        let chapter: Chapter = serde_json::from_value(serde_json::json!({
            "number": 3,
            "createdAt": "2024-03-15T10:00:00Z",
            "views": 9
        }))
        .unwrap();
        let entry = ChapterEntry::new(5, &chapter);
        assert_eq!(entry.label, "Capítulo 3");
        assert_eq!(entry.date, "15 de março de 2024");
        assert_eq!(entry.reader.path(), "reader.html?manga=5&chapter=3");
    }
}
