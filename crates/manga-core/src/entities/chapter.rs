use serde::{Deserialize, Serialize};

use super::nullable;

/// A chapter of a manga.
///
/// The reader expects chapters in ascending `number` order. Numbers are not
/// checked for uniqueness; the server is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub id: i64,
    pub number: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub pages: Vec<PageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub views: u64,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<String>,
}

/// A page image reference. The backend sends either a bare path or `{ "url": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Path(String),
    Object { url: String },
}

impl PageRef {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Path(path) | Self::Object { url: path } => path,
        }
    }
}

/// Sort chapters ascending by number. Stable, so duplicates keep server order.
pub fn sort_chapters(chapters: &mut [Chapter]) {
    chapters.sort_by_key(|chapter| chapter.number);
}
