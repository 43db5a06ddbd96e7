use serde::{Deserialize, Serialize};

use super::{Chapter, flag, nullable};
use crate::enums::StatusKind;

/// A manga as returned by `/mangas` and `/mangas/:id`.
///
/// `status` is kept exactly as stored; use [`Manga::status_kind`] for the
/// case-insensitive classification the UI shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manga {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(
        default,
        rename = "isLatest",
        alias = "is_latest",
        deserialize_with = "flag"
    )]
    pub is_latest: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub chapters: Vec<Chapter>,
    #[serde(default, deserialize_with = "nullable")]
    pub views: u64,
}

impl Manga {
    #[must_use]
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    #[must_use]
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::classify(&self.status)
    }

    /// Case-insensitive substring match over title and description.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_snake_case_latest_flag() {
        let manga: Manga = serde_json::from_str(
            r#"{"id": 1, "title": "Berserk", "status": "Finalizado", "is_latest": true}"#,
        )
        .unwrap();
        assert!(manga.is_latest);
        assert_eq!(manga.status_kind(), StatusKind::Completed);
        assert_eq!(manga.chapter_count(), 0);
    }

    #[test]
    fn search_covers_description() {
        let manga: Manga = serde_json::from_str(
            r#"{"id": 1, "title": "Vagabond", "description": "A vida de Musashi", "isLatest": false}"#,
        )
        .unwrap();
        assert!(manga.matches_search("musashi"));
        assert!(manga.matches_search("vaga"));
        assert!(!manga.matches_search("berserk"));
    }

    #[test]
    fn latest_flag_accepts_integers() {
        let manga: Manga = serde_json::from_str(r#"{"id": 1, "is_latest": 1}"#).unwrap();
        assert!(manga.is_latest);
        let manga: Manga = serde_json::from_str(r#"{"id": 1, "isLatest": "false"}"#).unwrap();
        assert!(!manga.is_latest);
    }
}
