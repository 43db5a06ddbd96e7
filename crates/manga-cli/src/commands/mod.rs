pub mod admin;
pub mod auth;
pub mod catalog;
pub mod dispatch;
pub mod latest;
pub mod manga;
pub mod read;
