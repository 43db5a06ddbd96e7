pub mod admin;
pub mod auth;
pub mod manga;

pub use admin::{AdminCommands, AdminMangaCommands, UserCommands};
pub use auth::AuthCommands;
pub use manga::MangaCommands;
