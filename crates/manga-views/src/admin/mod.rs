//! The admin panel: manga CRUD with uploads, and user role management.

mod draft;
mod form;
mod panel;

pub use draft::{DraftChapter, UploadDraft};
pub use form::{FormMode, MangaForm};
pub use panel::{
    AdminPanel, ConfirmModal, MangaFilter, MangaModal, MangaStats, UserCard, UserModal, UserStats,
};
