//! # manga-api
//!
//! Typed REST client for the SiteManga backend.
//!
//! [`MangaApi`] wraps an [`manga_auth::AuthClient`] and exposes one method per
//! endpoint: catalog and reader reads, favorites, and the admin manga/user
//! mutations. Manga create/edit bodies are built from a [`MangaSubmission`].

mod client;
mod error;
mod http;
pub mod upload;

pub use client::MangaApi;
pub use error::ApiError;
pub use upload::{ChapterManifest, ChapterUpload, MangaSubmission, UploadFile};
