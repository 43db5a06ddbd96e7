//! # manga-views
//!
//! Screen state for the SiteManga client, independent of any renderer.
//!
//! Each screen loads through [`manga_api::MangaApi`], turns failures into
//! [`Notification`]s, and hands navigation back to the caller as a
//! [`manga_core::Redirect`]. Filtering, sorting, pagination, chapter
//! navigation, and form validation are pure and run in memory.

pub mod admin;
pub mod auth_forms;
pub mod cards;
pub mod catalog;
pub mod detail;
pub mod error;
pub mod home;
pub mod notify;
pub mod reader;

pub use admin::{AdminPanel, MangaFilter, MangaForm, UploadDraft};
pub use auth_forms::{LoginForm, RegisterForm};
pub use cards::MangaCard;
pub use catalog::{Catalog, CatalogQuery, Pagination, SortOrder};
pub use detail::MangaDetail;
pub use error::ValidationError;
pub use home::Home;
pub use notify::{Notification, NotificationKind, Notifications};
pub use reader::{Reader, ReaderError, ReaderPages, ScrollProgress};
