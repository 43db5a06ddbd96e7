//! # manga-core
//!
//! Core types shared by every SiteManga client crate.
//!
//! - Entity structs mirroring the REST resources (users, mangas, chapters, pages)
//! - The persisted [`Session`] and its logged-in invariant
//! - Response envelopes returned by the backend
//! - Navigation targets ([`Page`], [`Redirect`]) used in place of browser redirects
//! - Asset URL resolution for covers and chapter pages
//! - User-facing message catalog
//! - Cross-cutting error types

pub mod assets;
pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod messages;
pub mod navigation;
pub mod responses;
pub mod session;

pub use entities::{Chapter, Manga, PageRef, User};
pub use enums::{Role, StatusKind};
pub use errors::CoreError;
pub use navigation::{Page, Redirect};
pub use session::Session;
