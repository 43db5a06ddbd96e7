//! Navigation targets.
//!
//! The client never navigates on its own. Operations that would redirect the
//! browser return a [`Redirect`] and the caller decides what to do with it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home,
    Catalog,
    MangaDetail { id: i64 },
    Reader { manga_id: i64, chapter: Option<u32> },
    Login,
    Register,
    Admin,
}

impl Page {
    /// Relative URL of the page, query string included.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "index.html".into(),
            Self::Catalog => "catalogo.html".into(),
            Self::MangaDetail { id } => format!("manga-detail.html?id={id}"),
            Self::Reader {
                manga_id,
                chapter: None,
            } => format!("reader.html?manga={manga_id}"),
            Self::Reader {
                manga_id,
                chapter: Some(number),
            } => format!("reader.html?manga={manga_id}&chapter={number}"),
            Self::Login => "login.html".into(),
            Self::Register => "register.html".into(),
            Self::Admin => "admin.html".into(),
        }
    }

    /// Landing page after login, by role.
    #[must_use]
    pub const fn after_login(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Home }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A pending navigation, optionally delayed so a message can be read first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: Page,
    pub after_ms: u64,
}

impl Redirect {
    #[must_use]
    pub const fn immediate(to: Page) -> Self {
        Self { to, after_ms: 0 }
    }

    #[must_use]
    pub const fn delayed(to: Page, after_ms: u64) -> Self {
        Self { to, after_ms }
    }

    #[must_use]
    pub const fn delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.after_ms)
    }
}
